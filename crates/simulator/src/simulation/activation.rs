//! Decides which trips are in service at a given moment.

use std::sync::Arc;

use chrono::Weekday;

use crate::models::{ServiceTime, Trip};

/// A trip is active when it runs on `day` and `now` lies within its first and
/// last stop times, both ends included. `now` is folded into a single day first.
pub fn is_active(trip: &Trip, now: ServiceTime, day: Weekday) -> bool {
    let now = now.folded();
    trip.calendar().runs_on(day)
        && trip.first_stop_time().time <= now
        && now <= trip.last_stop_time().time
}

pub fn active_trips(trips: &[Arc<Trip>], now: ServiceTime, day: Weekday) -> Vec<&Arc<Trip>> {
    trips.iter().filter(|trip| is_active(trip, now, day)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{RouteIdentifier, StopIdentifier, TripIdentifier};
    use crate::models::{Direction, ServiceCalendar, StopTime};
    use geo::Point;

    fn trip(id: &str, calendar: ServiceCalendar, start: f64, end: f64) -> Arc<Trip> {
        let stop = |name: &str, minutes: f64| StopTime {
            stop_id: StopIdentifier::new(name),
            name: name.into(),
            location: Point::new(9.19, 45.46),
            time: ServiceTime::from_minutes(minutes),
        };

        Arc::new(
            Trip::new(
                TripIdentifier::new(id),
                RouteIdentifier::new("r"),
                "End",
                calendar,
                Direction::Outbound,
                vec![stop("a", start), stop("b", end)],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_window_is_inclusive() {
        let t = trip("t", ServiceCalendar::Weekday, 300.0, 310.0);
        let at = ServiceTime::from_minutes;

        assert!(!is_active(&t, at(299.9), Weekday::Mon));
        assert!(is_active(&t, at(300.0), Weekday::Mon));
        assert!(is_active(&t, at(305.0), Weekday::Mon));
        assert!(is_active(&t, at(310.0), Weekday::Mon));
        assert!(!is_active(&t, at(310.1), Weekday::Mon));
    }

    #[test]
    fn test_calendar_must_match_day() {
        let weekday = trip("wd", ServiceCalendar::Weekday, 300.0, 310.0);
        let weekend = trip("we", ServiceCalendar::Weekend, 300.0, 310.0);
        let now = ServiceTime::from_minutes(305.0);

        assert!(is_active(&weekday, now, Weekday::Fri));
        assert!(!is_active(&weekday, now, Weekday::Sat));
        assert!(!is_active(&weekend, now, Weekday::Fri));
        assert!(is_active(&weekend, now, Weekday::Sun));
    }

    #[test]
    fn test_times_past_midnight_are_folded() {
        let t = trip("t", ServiceCalendar::Weekday, 300.0, 310.0);

        // 1745 is 05:05 on the following day
        assert!(is_active(&t, ServiceTime::from_minutes(1745.0), Weekday::Mon));
        assert!(is_active(&t, ServiceTime::from_minutes(-1135.0), Weekday::Mon));
        assert_eq!(active_trips(&[t], ServiceTime::from_minutes(1740.0), Weekday::Mon).len(), 1);
    }

    #[test]
    fn test_active_trips_filters() {
        let trips = vec![
            trip("early", ServiceCalendar::Weekday, 300.0, 310.0),
            trip("late", ServiceCalendar::Weekday, 320.0, 330.0),
            trip("weekend", ServiceCalendar::Weekend, 300.0, 330.0),
        ];

        let active = active_trips(&trips, ServiceTime::from_minutes(305.0), Weekday::Tue);
        let ids: Vec<_> = active.iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["early"]);

        assert!(active_trips(&trips, ServiceTime::from_minutes(315.0), Weekday::Tue).is_empty());
    }
}
