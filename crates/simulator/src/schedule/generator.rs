//! Expands a route's stop pattern and headway into a day of directional trips.

use crate::config::{SimulationConfig, WeekendService};
use crate::identifiers::{RouteIdentifier, TripIdentifier};
use crate::models::{Direction, Result, ServiceCalendar, ServiceTime, SimulationError, StopTime, Trip};
use crate::schedule::catalog::{ServicePattern, StopDefinition};

/// Generate every trip of one service day for both directions.
///
/// Departures start at `service_start` and repeat every `frequency_minutes`
/// while they are before `service_end`. Inbound trips run the stop pattern in
/// reverse and are signed for the outbound origin.
pub fn generate_trips(
    route_id: &RouteIdentifier,
    pattern: &ServicePattern,
    config: &SimulationConfig,
) -> Result<Vec<Trip>> {
    validate_pattern(route_id, pattern)?;

    let interval = config.stop_interval(pattern.stops.len());
    let frequency = f64::from(pattern.frequency_minutes);
    let mut trips = Vec::new();

    for direction in Direction::ALL {
        let (sequence, headsign) = match direction {
            Direction::Outbound => (pattern.stops.iter().collect::<Vec<_>>(), pattern.headsign.clone()),
            Direction::Inbound => (pattern.stops.iter().rev().collect(), pattern.stops[0].name.clone()),
        };

        let mut departure = config.service_start;
        while departure < config.service_end {
            let id = TripIdentifier::new(format!("{route_id}-{direction}-{}", trips.len()));
            let stop_times = stop_times_from(&sequence, departure, interval);

            trips.push(Trip::new(
                id,
                route_id.clone(),
                headsign.clone(),
                ServiceCalendar::Weekday,
                direction,
                stop_times,
            )?);

            departure = departure.offset(frequency);
        }
    }

    if config.weekend_service == WeekendService::MirrorWeekday {
        let weekend: Vec<Trip> = trips
            .iter()
            .map(|trip| {
                let id = TripIdentifier::new(format!("{}-weekend", trip.id()));
                trip.with_calendar(id, ServiceCalendar::Weekend)
            })
            .collect();
        trips.extend(weekend);
    }

    Ok(trips)
}

fn validate_pattern(route_id: &RouteIdentifier, pattern: &ServicePattern) -> Result<()> {
    let invalid = |reason: String| SimulationError::InvalidRouteDefinition {
        route_id: route_id.clone(),
        reason,
    };

    if pattern.stops.len() < 2 {
        return Err(invalid(format!(
            "a trip needs at least 2 stops, pattern has {}",
            pattern.stops.len()
        )));
    }

    if pattern.frequency_minutes == 0 {
        return Err(invalid("frequency must be at least one minute".into()));
    }

    if let Some(stop) = pattern
        .stops
        .iter()
        .find(|s| !(s.location.x().is_finite() && s.location.y().is_finite()))
    {
        return Err(invalid(format!("stop {} has non-finite coordinates", stop.id)));
    }

    Ok(())
}

fn stop_times_from(
    sequence: &[&StopDefinition],
    departure: ServiceTime,
    interval: f64,
) -> Vec<StopTime> {
    sequence
        .iter()
        .enumerate()
        .map(|(i, stop)| StopTime {
            stop_id: stop.id.clone(),
            name: stop.name.clone(),
            location: stop.location,
            time: departure.offset(i as f64 * interval),
        })
        .collect()
}
