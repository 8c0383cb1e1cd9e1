//! Service calendar for determining which days a trip runs.

use chrono::Weekday;

/// Day class a trip is scheduled for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ServiceCalendar {
    Weekday,
    Weekend,
}

impl ServiceCalendar {
    /// Saturday and Sunday run the weekend timetable, every other day the weekday one.
    pub fn for_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            _ => Self::Weekday,
        }
    }

    /// Check if the service runs on a given day
    pub fn runs_on(self, day: Weekday) -> bool {
        self == Self::for_weekday(day)
    }
}
