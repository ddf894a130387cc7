//! Wall clock abstraction.
//!
//! The crowd target depends on the hour of day at the venue, so every
//! clock hands out offset-aware instants. [`SystemClock`] reads the host
//! clock; [`FixedClock`] pins time for tests.

use chrono::{DateTime, FixedOffset, Local, Timelike, Utc};

/// Errors that can occur when building a clock.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The configured UTC offset is outside what a time zone can be.
    #[error("invalid UTC offset: {minutes} minutes")]
    InvalidOffset {
        /// The rejected offset in minutes east of UTC.
        minutes: i32,
    },
}

/// A source of the current time.
pub trait WallClock: Send + Sync {
    /// The current instant in venue-local time.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Hour of day (0-23) of an instant in its own offset.
pub fn hour_of_day(now: &DateTime<FixedOffset>) -> u32 {
    now.hour()
}

/// Reads the host clock.
///
/// With an explicit offset the clock reports that zone regardless of the
/// host's settings; otherwise it follows the host's local zone, including
/// its daylight saving transitions. A fixed offset never changes with the
/// season, so zones that observe daylight time should leave it unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// A clock that follows the host's local time zone.
    pub const fn local() -> Self {
        Self { offset: None }
    }

    /// A clock pinned to a fixed offset.
    pub const fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }

    /// Build a clock from an optional offset in minutes east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidOffset`] if the offset is 24 hours or
    /// more in either direction.
    pub fn from_offset_minutes(minutes: Option<i32>) -> Result<Self, ClockError> {
        let Some(minutes) = minutes else {
            return Ok(Self::local());
        };
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::with_offset)
            .ok_or(ClockError::InvalidOffset { minutes })
    }

    /// `instant` as this clock would report it.
    pub fn at(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self.offset {
            Some(offset) => instant.with_timezone(&offset),
            None => instant.with_timezone(&Local).fixed_offset(),
        }
    }
}

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.at(Utc::now())
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a clock that always reports `instant`.
    pub const fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Offset;

    use super::*;

    #[test]
    fn fixed_clock_reports_its_instant() {
        let instant = DateTime::parse_from_rfc3339("2026-03-14T09:30:00-07:00").unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(hour_of_day(&clock.now()), 9);
    }

    #[test]
    fn hour_is_taken_in_local_offset() {
        // 02:00 UTC is 19:00 the previous evening in Vancouver (PDT).
        let instant = DateTime::parse_from_rfc3339("2026-07-02T02:00:00+00:00").unwrap();
        let pdt = FixedOffset::west_opt(7 * 3600).unwrap();
        assert_eq!(hour_of_day(&instant.with_timezone(&pdt)), 19);
    }

    #[test]
    fn offset_minutes_builds_pinned_clock() {
        let clock = SystemClock::from_offset_minutes(Some(-480)).unwrap();
        assert_eq!(clock.now().offset().local_minus_utc(), -480 * 60);
    }

    #[test]
    fn no_offset_means_local() {
        assert!(SystemClock::from_offset_minutes(None).is_ok());
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let err = SystemClock::from_offset_minutes(Some(24 * 60)).unwrap_err();
        assert!(matches!(err, ClockError::InvalidOffset { minutes: 1440 }));
    }

    #[test]
    fn local_clock_follows_host_zone_in_summer() {
        // 10:30 PDT in Vancouver; the daylight offset must come from the
        // zone rules, not from a pinned standard offset.
        let instant = DateTime::parse_from_rfc3339("2026-07-16T17:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let seen = SystemClock::local().at(instant);
        let host = instant.with_timezone(&Local);
        assert_eq!(hour_of_day(&seen), host.hour());
        assert_eq!(seen.offset().local_minus_utc(), host.offset().fix().local_minus_utc());
    }

    #[test]
    fn pinned_offset_ignores_daylight_time() {
        let instant = DateTime::parse_from_rfc3339("2026-07-16T17:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let pst = SystemClock::from_offset_minutes(Some(-480)).unwrap();
        let pdt = SystemClock::from_offset_minutes(Some(-420)).unwrap();
        assert_eq!(hour_of_day(&pst.at(instant)), 9);
        assert_eq!(hour_of_day(&pdt.at(instant)), 10);
    }
}
