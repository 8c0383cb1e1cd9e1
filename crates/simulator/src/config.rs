//! Simulation tunables.

use crate::models::{Result, ServiceTime, SimulationError, MINUTES_PER_DAY};

/// How weekend days are served
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeekendService {
    /// Only weekday-tagged trips are generated, so nothing runs on Saturday or Sunday.
    #[default]
    WeekdayOnly,
    /// Every generated weekday trip also gets a weekend-tagged twin.
    MirrorWeekday,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// First departure of the service day
    pub service_start: ServiceTime,
    /// No trip departs at or after this time
    pub service_end: ServiceTime,

    /// Routes with more stops than this use the long-route stop interval
    pub long_route_stop_threshold: usize,
    /// Minutes between consecutive stops on long routes
    pub long_route_stop_interval: f64,
    /// Minutes between consecutive stops on short routes
    pub short_route_stop_interval: f64,

    pub min_speed_kmh: f64,
    pub max_speed_kmh: f64,

    /// Report a vehicle standing at its terminus at exactly the last stop time
    /// instead of dropping it from the snapshot.
    pub arrival_inclusive: bool,

    pub weekend_service: WeekendService,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            service_start: ServiceTime::from_minutes(300.0), // 05:00
            service_end: ServiceTime::END_OF_DAY,
            long_route_stop_threshold: 4,
            long_route_stop_interval: 2.5,
            short_route_stop_interval: 2.0,
            min_speed_kmh: 10.0,
            max_speed_kmh: 50.0,
            arrival_inclusive: false,
            weekend_service: WeekendService::WeekdayOnly,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        let start = self.service_start.minutes();
        let end = self.service_end.minutes();
        if !(start.is_finite() && end.is_finite()) || start < 0.0 || end > MINUTES_PER_DAY {
            return Err(SimulationError::InvalidConfig(format!(
                "service hours must lie within [0, {MINUTES_PER_DAY}] minutes, got {start} to {end}"
            )));
        }

        if start >= end {
            return Err(SimulationError::InvalidConfig(format!(
                "service_start ({}) must be before service_end ({})",
                self.service_start, self.service_end
            )));
        }

        for (name, interval) in [
            ("long_route_stop_interval", self.long_route_stop_interval),
            ("short_route_stop_interval", self.short_route_stop_interval),
        ] {
            if !(interval.is_finite() && interval > 0.0) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} must be a positive number of minutes, got {interval}"
                )));
            }
        }

        if !(self.min_speed_kmh.is_finite() && self.max_speed_kmh.is_finite())
            || self.min_speed_kmh < 0.0
            || self.min_speed_kmh > self.max_speed_kmh
        {
            return Err(SimulationError::InvalidConfig(format!(
                "speed bounds [{}, {}] are not a valid range",
                self.min_speed_kmh, self.max_speed_kmh
            )));
        }

        Ok(())
    }

    /// Minutes between consecutive stops for a pattern of `stop_count` stops
    pub fn stop_interval(&self, stop_count: usize) -> f64 {
        if stop_count > self.long_route_stop_threshold {
            self.long_route_stop_interval
        } else {
            self.short_route_stop_interval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        SimulationConfig::default().validate().unwrap();
    }

    #[test]
    fn test_stop_interval_depends_on_length() {
        let config = SimulationConfig::default();
        assert_eq!(config.stop_interval(5), 2.5);
        assert_eq!(config.stop_interval(4), 2.0);
        assert_eq!(config.stop_interval(2), 2.0);
    }

    #[test]
    fn test_rejects_inverted_service_hours() {
        let config = SimulationConfig {
            service_start: ServiceTime::from_minutes(600.0),
            service_end: ServiceTime::from_minutes(300.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_finite_service_hours() {
        let nan_start = SimulationConfig {
            service_start: ServiceTime::from_minutes(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(nan_start.validate(), Err(SimulationError::InvalidConfig(_))));

        let infinite_end = SimulationConfig {
            service_end: ServiceTime::from_minutes(f64::INFINITY),
            ..Default::default()
        };
        assert!(infinite_end.validate().is_err());
    }

    #[test]
    fn test_rejects_service_hours_outside_the_day() {
        let huge_end = SimulationConfig {
            service_end: ServiceTime::from_minutes(1e9),
            ..Default::default()
        };
        assert!(matches!(huge_end.validate(), Err(SimulationError::InvalidConfig(_))));

        let negative_start = SimulationConfig {
            service_start: ServiceTime::from_minutes(-10.0),
            ..Default::default()
        };
        assert!(negative_start.validate().is_err());

        let full_day = SimulationConfig {
            service_start: ServiceTime::MIDNIGHT,
            service_end: ServiceTime::END_OF_DAY,
            ..Default::default()
        };
        full_day.validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_intervals_and_speeds() {
        let zero_interval = SimulationConfig {
            short_route_stop_interval: 0.0,
            ..Default::default()
        };
        assert!(zero_interval.validate().is_err());

        let inverted_speed = SimulationConfig {
            min_speed_kmh: 60.0,
            ..Default::default()
        };
        assert!(inverted_speed.validate().is_err());
    }
}
