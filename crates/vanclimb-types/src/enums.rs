//! Enumeration types for the Van Climb landing page.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Dayparts
// ---------------------------------------------------------------------------

/// A named time-of-day bucket with a target occupancy percentage.
///
/// The simulated crowd level drifts toward the target of the daypart the
/// current hour falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Daypart {
    /// 06:00 to 10:00.
    MorningRush,
    /// 10:00 to 16:00.
    Midday,
    /// 16:00 to 21:00.
    EveningPeak,
    /// 21:00 to 06:00, wrapping past midnight.
    Late,
}

impl Daypart {
    /// Every daypart, in table order.
    pub const ALL: [Self; 4] = [Self::MorningRush, Self::Midday, Self::EveningPeak, Self::Late];

    /// Map an hour of the day (0-23) to its daypart.
    ///
    /// Ranges are half-open and checked in table order. The late range
    /// covers both `[21, 24)` and `[0, 6)`; any hour outside 0-23 also
    /// lands there.
    pub const fn from_hour(hour: u32) -> Self {
        if hour >= 6 && hour < 10 {
            Self::MorningRush
        } else if hour >= 10 && hour < 16 {
            Self::Midday
        } else if hour >= 16 && hour < 21 {
            Self::EveningPeak
        } else {
            Self::Late
        }
    }

    /// Target occupancy percentage for this daypart.
    pub const fn target_percent(self) -> u8 {
        match self {
            Self::MorningRush => 55,
            Self::Midday => 40,
            Self::EveningPeak => 78,
            Self::Late => 25,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MorningRush => "morning rush",
            Self::Midday => "midday",
            Self::EveningPeak => "evening peak",
            Self::Late => "late",
        }
    }
}

// ---------------------------------------------------------------------------
// Crowd levels
// ---------------------------------------------------------------------------

/// Lower bound (inclusive) of the [`CrowdLevel::Lively`] band.
pub const LIVELY_FROM_PERCENT: u8 = 50;

/// Lower bound (inclusive) of the [`CrowdLevel::Busy`] band.
pub const BUSY_FROM_PERCENT: u8 = 80;

/// Display classification of an occupancy percentage.
///
/// Derived from a reading every time it is shown. Never stored alongside
/// the reading it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum CrowdLevel {
    /// Under 50%.
    Chill,
    /// 50% up to but not including 80%.
    Lively,
    /// 80% and above.
    Busy,
}

impl CrowdLevel {
    /// Classify an occupancy percentage.
    pub const fn classify(percent: u8) -> Self {
        if percent < LIVELY_FROM_PERCENT {
            Self::Chill
        } else if percent < BUSY_FROM_PERCENT {
            Self::Lively
        } else {
            Self::Busy
        }
    }

    /// Short label shown next to the gauge.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chill => "Chill",
            Self::Lively => "Lively",
            Self::Busy => "Busy",
        }
    }

    /// One-line description of what to expect on the walls.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Chill => "Plenty of space on the walls.",
            Self::Lively => "Good vibes and short waits.",
            Self::Busy => "Peak hours. Expect some waits.",
        }
    }

    /// Accent colour name used for the percentage and status dot.
    pub const fn accent(self) -> &'static str {
        match self {
            Self::Chill => "emerald",
            Self::Lively => "amber",
            Self::Busy => "rose",
        }
    }

    /// Start and end colours of the meter gradient.
    pub const fn meter_gradient(self) -> (&'static str, &'static str) {
        match self {
            Self::Chill => ("#34d399", "#a3e635"),
            Self::Lively => ("#fbbf24", "#f97316"),
            Self::Busy => ("#f43f5e", "#dc2626"),
        }
    }
}

// ---------------------------------------------------------------------------
// Page sections
// ---------------------------------------------------------------------------

/// An addressable section of the landing page.
///
/// The ids are part of the navigation contract: links and fragments in
/// the page address refer to them and they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Section {
    /// The live crowd meter.
    Crowd,
    /// Onboarding for first-time climbers.
    First,
    /// Pass and membership prices.
    Pricing,
    /// Hours, location, and directions.
    Visit,
}

impl Section {
    /// Every section, in page order.
    pub const ALL: [Self; 4] = [Self::Crowd, Self::First, Self::Pricing, Self::Visit];

    /// Stable element id.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Crowd => "crowd",
            Self::First => "first",
            Self::Pricing => "pricing",
            Self::Visit => "visit",
        }
    }

    /// Label used in the top navigation bar.
    pub const fn nav_label(self) -> &'static str {
        match self {
            Self::Crowd => "Crowd",
            Self::First => "First-Timers",
            Self::Pricing => "Pricing",
            Self::Visit => "Visit",
        }
    }

    /// Resolve a fragment identifier (with or without the leading `#`).
    ///
    /// Returns `None` for empty, malformed, or stale fragments so callers
    /// can treat a miss as a no-op.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let id = fragment.strip_prefix('#').unwrap_or(fragment);
        Self::ALL.into_iter().find(|section| section.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morning_boundary_is_half_open() {
        assert_eq!(Daypart::from_hour(5), Daypart::Late);
        assert_eq!(Daypart::from_hour(6), Daypart::MorningRush);
        assert_eq!(Daypart::from_hour(9).target_percent(), 55);
        assert_eq!(Daypart::from_hour(10).target_percent(), 40);
    }

    #[test]
    fn evening_peak_ends_at_nine() {
        assert_eq!(Daypart::from_hour(15), Daypart::Midday);
        assert_eq!(Daypart::from_hour(16), Daypart::EveningPeak);
        assert_eq!(Daypart::from_hour(20).target_percent(), 78);
        assert_eq!(Daypart::from_hour(21), Daypart::Late);
    }

    #[test]
    fn late_wraps_past_midnight() {
        assert_eq!(Daypart::from_hour(23).target_percent(), 25);
        assert_eq!(Daypart::from_hour(0).target_percent(), 25);
        assert_eq!(Daypart::from_hour(3), Daypart::Late);
    }

    #[test]
    fn every_hour_has_a_daypart() {
        let late_hours = (0..24)
            .filter(|h| Daypart::from_hour(*h) == Daypart::Late)
            .count();
        // 21, 22, 23 plus 0 through 5.
        assert_eq!(late_hours, 9);
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(CrowdLevel::classify(0), CrowdLevel::Chill);
        assert_eq!(CrowdLevel::classify(49), CrowdLevel::Chill);
        assert_eq!(CrowdLevel::classify(50), CrowdLevel::Lively);
        assert_eq!(CrowdLevel::classify(79), CrowdLevel::Lively);
        assert_eq!(CrowdLevel::classify(80), CrowdLevel::Busy);
        assert_eq!(CrowdLevel::classify(100), CrowdLevel::Busy);
    }

    #[test]
    fn level_labels() {
        assert_eq!(CrowdLevel::Chill.label(), "Chill");
        assert_eq!(CrowdLevel::Lively.label(), "Lively");
        assert_eq!(CrowdLevel::Busy.label(), "Busy");
        assert_eq!(CrowdLevel::Busy.description(), "Peak hours. Expect some waits.");
    }

    #[test]
    fn fragment_lookup() {
        assert_eq!(Section::from_fragment("#pricing"), Some(Section::Pricing));
        assert_eq!(Section::from_fragment("visit"), Some(Section::Visit));
        assert_eq!(Section::from_fragment(""), None);
        assert_eq!(Section::from_fragment("#"), None);
        assert_eq!(Section::from_fragment("#Pricing"), None);
        assert_eq!(Section::from_fragment("#old-section"), None);
    }

    #[test]
    fn section_serializes_as_id() {
        let json = serde_json::to_string(&Section::First).ok();
        assert_eq!(json.as_deref(), Some("\"first\""));
    }
}
