//! Crowd readings and their display projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::CrowdLevel;

/// Fixed venue capacity used by the simulation.
pub const VENUE_CAPACITY: u16 = 200;

/// Headcount for an occupancy percentage: `round(percent / 100 * capacity)`.
///
/// Percentages above 100 are treated as 100.
// The rounded value is bounded by VENUE_CAPACITY since percent <= 100.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn count_for(percent: u8) -> u16 {
    let percent = percent.min(100);
    (f64::from(percent) / 100.0 * f64::from(VENUE_CAPACITY)).round() as u16
}

/// A synthetic occupancy reading.
///
/// Readings are immutable snapshots: each update replaces the previous
/// one, so readers always see a complete, consistent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CrowdReading {
    /// Occupancy in percent, 0-100.
    pub percent: u8,
    /// Estimated number of climbers in the building.
    pub count: u16,
    /// Venue capacity the count is relative to.
    pub capacity: u16,
    /// When this reading was computed.
    pub updated_at: DateTime<Utc>,
}

impl CrowdReading {
    /// Percentage every new simulation starts from.
    pub const SEED_PERCENT: u8 = 42;

    /// Headcount every new simulation starts from.
    pub const SEED_COUNT: u16 = 85;

    /// The fixed starting reading for a new simulation.
    ///
    /// The seed count is a hand-picked figure and is not derived from the
    /// seed percentage; every reading produced by an update is.
    pub const fn seed(now: DateTime<Utc>) -> Self {
        Self {
            percent: Self::SEED_PERCENT,
            count: Self::SEED_COUNT,
            capacity: VENUE_CAPACITY,
            updated_at: now,
        }
    }

    /// Build a reading from a percentage, deriving the headcount.
    pub fn from_percent(percent: u8, updated_at: DateTime<Utc>) -> Self {
        let percent = percent.min(100);
        Self {
            percent,
            count: count_for(percent),
            capacity: VENUE_CAPACITY,
            updated_at,
        }
    }

    /// Whether the percent range and headcount invariants hold.
    pub fn is_consistent(&self) -> bool {
        self.percent <= 100
            && self.capacity == VENUE_CAPACITY
            && self.count == count_for(self.percent)
    }

    /// Display classification of this reading.
    pub const fn level(&self) -> CrowdLevel {
        CrowdLevel::classify(self.percent)
    }
}

/// Display projection of a crowd level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CrowdStatus {
    /// Which band the reading falls into.
    pub level: CrowdLevel,
    /// Short label ("Chill", "Lively", "Busy").
    pub label: String,
    /// One-line description.
    pub description: String,
    /// Accent colour name.
    pub accent: String,
    /// Meter gradient start colour.
    pub meter_from: String,
    /// Meter gradient end colour.
    pub meter_to: String,
}

impl CrowdStatus {
    /// Classify a percentage and expand it into display fields.
    pub fn from_percent(percent: u8) -> Self {
        let level = CrowdLevel::classify(percent);
        let (meter_from, meter_to) = level.meter_gradient();
        Self {
            level,
            label: level.label().to_owned(),
            description: level.description().to_owned(),
            accent: level.accent().to_owned(),
            meter_from: meter_from.to_owned(),
            meter_to: meter_to.to_owned(),
        }
    }
}

/// One frame pushed to the page: a reading plus its freshly derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CrowdUpdate {
    /// The reading itself.
    pub reading: CrowdReading,
    /// Classification of `reading.percent`.
    pub status: CrowdStatus,
    /// Meter fill width in percent, clamped to 0-100.
    pub meter_width: u8,
}

impl CrowdUpdate {
    /// Project a reading for display.
    pub fn from_reading(reading: CrowdReading) -> Self {
        Self {
            status: CrowdStatus::from_percent(reading.percent),
            meter_width: reading.percent.min(100),
            reading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_rounded_share_of_capacity() {
        assert_eq!(count_for(0), 0);
        assert_eq!(count_for(42), 84);
        assert_eq!(count_for(55), 110);
        assert_eq!(count_for(100), 200);
        assert_eq!(count_for(250), 200);
    }

    #[test]
    fn seed_matches_published_values() {
        let seed = CrowdReading::seed(Utc::now());
        assert_eq!(seed.percent, 42);
        assert_eq!(seed.count, 85);
        assert_eq!(seed.capacity, 200);
    }

    #[test]
    fn from_percent_derives_count() {
        let reading = CrowdReading::from_percent(78, Utc::now());
        assert_eq!(reading.count, 156);
        assert!(reading.is_consistent());
    }

    #[test]
    fn from_percent_clamps() {
        let reading = CrowdReading::from_percent(130, Utc::now());
        assert_eq!(reading.percent, 100);
        assert!(reading.is_consistent());
    }

    #[test]
    fn status_follows_percent() {
        let busy = CrowdUpdate::from_reading(CrowdReading::from_percent(91, Utc::now()));
        assert_eq!(busy.status.level, CrowdLevel::Busy);
        assert_eq!(busy.status.label, "Busy");
        assert_eq!(busy.meter_width, 91);

        let chill = CrowdUpdate::from_reading(CrowdReading::from_percent(12, Utc::now()));
        assert_eq!(chill.status.accent, "emerald");
    }

    #[test]
    fn update_serializes_nested_reading() {
        let update = CrowdUpdate::from_reading(CrowdReading::from_percent(50, Utc::now()));
        let json = serde_json::to_value(&update).unwrap_or_default();
        assert_eq!(json["reading"]["percent"], 50);
        assert_eq!(json["reading"]["count"], 100);
        assert_eq!(json["status"]["level"], "Lively");
    }
}
