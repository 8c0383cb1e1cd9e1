//! Vehicle position, heading, and speed from the stop times bracketing `now`.

use geo::Point;

use crate::config::SimulationConfig;
use crate::identifiers::StopIdentifier;
use crate::models::{ServiceTime, StopTime, Trip};
use crate::spatial::queries::{haversine_distance_km, initial_bearing};

#[derive(Clone, Debug, PartialEq)]
pub struct VehiclePosition {
    /// x = longitude, y = latitude
    pub location: Point,
    /// Compass bearing within `[0, 360)`
    pub heading_degrees: f64,
    pub speed_kmh: f64,
    pub next_stop_id: StopIdentifier,
    /// Fraction of the current leg covered, within `[0, 1)`; exactly 1 only for
    /// a vehicle reported at its terminus under `arrival_inclusive`
    pub progress: f64,
    /// Index of the stop time the current leg starts from
    pub segment: usize,
}

impl VehiclePosition {
    pub fn lat(&self) -> f64 {
        self.location.y()
    }

    pub fn lon(&self) -> f64 {
        self.location.x()
    }

    pub fn is_finite(&self) -> bool {
        self.location.x().is_finite()
            && self.location.y().is_finite()
            && self.heading_degrees.is_finite()
            && self.speed_kmh.is_finite()
            && self.progress.is_finite()
    }
}

/// Locate a trip's vehicle at `now`.
///
/// The leg is the unique `i` with `t[i] <= now < t[i + 1]`. Returns `None` when
/// there is no such leg, which includes `now` exactly at the last stop time
/// unless `config.arrival_inclusive` is set.
pub fn position_of(trip: &Trip, now: ServiceTime, config: &SimulationConfig) -> Option<VehiclePosition> {
    let now = now.folded();
    let stop_times = trip.stop_times();

    if let Some(segment) = stop_times
        .windows(2)
        .position(|leg| leg[0].time <= now && now < leg[1].time)
    {
        let (from, to) = (&stop_times[segment], &stop_times[segment + 1]);
        let progress = now.minutes_since(from.time) / to.time.minutes_since(from.time);

        return Some(VehiclePosition {
            location: lerp(from.location, to.location, progress),
            heading_degrees: initial_bearing(from.location, to.location),
            speed_kmh: segment_speed_kmh(from, to, config),
            next_stop_id: to.stop_id.clone(),
            progress,
            segment,
        });
    }

    let last = trip.last_stop_time();
    if config.arrival_inclusive && now == last.time {
        let segment = stop_times.len() - 2;
        let from = &stop_times[segment];

        return Some(VehiclePosition {
            location: last.location,
            heading_degrees: initial_bearing(from.location, last.location),
            speed_kmh: segment_speed_kmh(from, last, config),
            next_stop_id: last.stop_id.clone(),
            progress: 1.0,
            segment,
        });
    }

    None
}

/// Average speed over a leg, clamped to the configured bounds.
///
/// A leg with no positive duration reports 0.
pub fn segment_speed_kmh(from: &StopTime, to: &StopTime, config: &SimulationConfig) -> f64 {
    let minutes = to.time.minutes_since(from.time);
    if minutes <= 0.0 {
        return 0.0;
    }

    let raw = haversine_distance_km(from.location, to.location) / minutes * 60.0;
    raw.max(config.min_speed_kmh).min(config.max_speed_kmh)
}

// planar; fine at city scale
fn lerp(from: Point, to: Point, t: f64) -> Point {
    Point::new(from.x() + (to.x() - from.x()) * t, from.y() + (to.y() - from.y()) * t)
}
