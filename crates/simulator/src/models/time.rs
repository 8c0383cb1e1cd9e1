//! Time of day within a service day.

use chrono::{NaiveTime, Timelike};
use std::fmt;

pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Minutes since local midnight of the service day.
///
/// Scheduled stop times are stored as-is and may run past 1440 for trips that
/// start late in the evening. Query times coming from a wall clock are always
/// folded into `[0, 1440)` with [`ServiceTime::wrapping`].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ServiceTime(f64);

impl ServiceTime {
    pub const MIDNIGHT: Self = Self(0.0);
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    pub const fn from_minutes(minutes: f64) -> Self {
        Self(minutes)
    }

    pub fn from_hm(hours: u32, minutes: u32) -> Self {
        Self::wrapping(f64::from(hours * 60 + minutes))
    }

    /// Fold any minute count into a single day. Non-finite input maps to midnight.
    pub fn wrapping(minutes: f64) -> Self {
        if !minutes.is_finite() {
            return Self::MIDNIGHT;
        }

        let folded = minutes.rem_euclid(MINUTES_PER_DAY);
        // rem_euclid rounds tiny negatives up to exactly 1440
        if folded >= MINUTES_PER_DAY {
            Self::MIDNIGHT
        } else {
            Self(folded)
        }
    }

    /// Wall-clock time with second resolution.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        let minutes = f64::from(time.hour() * 60 + time.minute()) + f64::from(time.second()) / 60.0;
        Self::wrapping(minutes)
    }

    /// This time folded into `[0, 1440)`.
    pub fn folded(self) -> Self {
        Self::wrapping(self.0)
    }

    pub fn minutes(self) -> f64 {
        self.0
    }

    pub fn offset(self, minutes: f64) -> Self {
        Self(self.0 + minutes)
    }

    /// Signed distance in minutes from `earlier` to `self`.
    pub fn minutes_since(self, earlier: ServiceTime) -> f64 {
        self.0 - earlier.0
    }
}

impl From<NaiveTime> for ServiceTime {
    fn from(time: NaiveTime) -> Self {
        Self::from_naive_time(time)
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.max(0.0).floor() as u64;
        write!(f, "{:02}:{:02}", total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_wrapping_folds_into_one_day() {
        assert_abs_diff_eq!(ServiceTime::wrapping(1500.0).minutes(), 60.0);
        assert_abs_diff_eq!(ServiceTime::wrapping(-30.0).minutes(), 1410.0);
        assert_abs_diff_eq!(ServiceTime::wrapping(1440.0).minutes(), 0.0);
        assert_eq!(ServiceTime::wrapping(f64::NAN), ServiceTime::MIDNIGHT);

        let tiny = ServiceTime::wrapping(-1e-20);
        assert!(tiny.minutes() >= 0.0 && tiny.minutes() < MINUTES_PER_DAY);
    }

    #[test]
    fn test_folded_matches_wrapping() {
        assert_eq!(ServiceTime::from_minutes(1740.0).folded(), ServiceTime::from_minutes(300.0));
        assert_eq!(ServiceTime::from_minutes(600.0).folded(), ServiceTime::from_minutes(600.0));
    }

    #[test]
    fn test_from_naive_time_keeps_seconds() {
        let t = NaiveTime::from_hms_opt(8, 20, 30).unwrap();
        assert_abs_diff_eq!(ServiceTime::from(t).minutes(), 500.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(ServiceTime::from_hm(7, 5).to_string(), "07:05");
        assert_eq!(ServiceTime::from_minutes(1442.5).to_string(), "24:02");
    }
}
