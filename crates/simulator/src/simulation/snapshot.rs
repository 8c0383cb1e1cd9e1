//! Per-tick aggregation of every vehicle currently in service.

use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};
use rand::Rng;
use tracing::{debug, warn};

use crate::identifiers::*;
use crate::models::{Route, ServiceTime, VehicleKind};
use crate::schedule::Schedule;
use crate::simulation::activation::active_trips;
use crate::simulation::interpolation::position_of;
use crate::simulation::occupancy::{estimate_occupancy, OccupancyLevel};

/// One vehicle at one instant. Produced fresh on every tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VehicleSnapshot {
    pub id: VehicleIdentifier,
    pub route_id: RouteIdentifier,
    pub trip_id: TripIdentifier,
    pub display_name: Arc<str>,
    pub vehicle_kind: VehicleKind,
    pub color: Arc<str>,
    pub lat: f64,
    pub lon: f64,
    pub heading_degrees: f64,
    pub speed_kmh: f64,
    /// Headsign of the trip
    pub destination: Arc<str>,
    pub occupancy: OccupancyLevel,
    pub next_stop_id: StopIdentifier,
    pub observed_at: NaiveDateTime,
}

/// Every active vehicle across all routes, using the thread-local RNG for occupancy.
pub fn snapshot(schedule: &Schedule, now: NaiveDateTime) -> Vec<VehicleSnapshot> {
    snapshot_with_rng(schedule, now, &mut rand::rng())
}

pub fn snapshot_with_rng<R: Rng + ?Sized>(
    schedule: &Schedule,
    now: NaiveDateTime,
    rng: &mut R,
) -> Vec<VehicleSnapshot> {
    collect_vehicles(schedule, schedule.routes().iter(), now, rng)
}

/// Like [`snapshot_with_rng`] restricted to `route_ids`. Unknown ids are ignored.
pub fn snapshot_for_routes<R: Rng + ?Sized>(
    schedule: &Schedule,
    now: NaiveDateTime,
    route_ids: &[RouteIdentifier],
    rng: &mut R,
) -> Vec<VehicleSnapshot> {
    let routes = route_ids.iter().filter_map(|id| {
        let route = schedule.route(id);
        if route.is_none() {
            debug!(route = %id, "ignoring unknown route in snapshot filter");
        }
        route
    });

    collect_vehicles(schedule, routes, now, rng)
}

fn collect_vehicles<'a, R: Rng + ?Sized>(
    schedule: &Schedule,
    routes: impl Iterator<Item = &'a Arc<Route>>,
    now: NaiveDateTime,
    rng: &mut R,
) -> Vec<VehicleSnapshot> {
    let minutes = ServiceTime::from_naive_time(now.time());
    let day = now.weekday();
    let mut vehicles = Vec::new();

    for route in routes {
        for trip in active_trips(schedule.trips(&route.id), minutes, day) {
            let Some(position) = position_of(trip, minutes, schedule.config()) else {
                continue;
            };

            if !position.is_finite() {
                warn!(
                    route = %route.id,
                    trip = %trip.id(),
                    "skipping trip with non-finite position"
                );
                continue;
            }

            vehicles.push(VehicleSnapshot {
                id: VehicleIdentifier::for_trip(&route.id, trip.id()),
                route_id: route.id.clone(),
                trip_id: trip.id().clone(),
                display_name: route.display_name.clone(),
                vehicle_kind: route.kind,
                color: route.color.clone(),
                lat: position.lat(),
                lon: position.lon(),
                heading_degrees: position.heading_degrees,
                speed_kmh: position.speed_kmh,
                destination: trip.headsign().into(),
                occupancy: estimate_occupancy(minutes, rng),
                next_stop_id: position.next_stop_id,
                observed_at: now,
            });
        }
    }

    debug!(vehicles = vehicles.len(), at = %minutes, weekday = %day, "computed snapshot");
    vehicles
}
