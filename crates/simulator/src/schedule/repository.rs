//! Immutable in-memory schedule: routes, their trips, and a stop index.
//!
//! Built once at startup and only read afterwards, so a single `Schedule` can
//! be shared behind an `Arc` by any number of concurrent snapshot computations.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::Weekday;
use geo::Point;
use rstar::{RTree, AABB};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::identifiers::*;
use crate::models::{Result, Route, ServiceTime, SimulationError, Trip};
use crate::schedule::catalog::RouteDefinition;
use crate::schedule::generator::generate_trips;
use crate::simulation::activation;
use crate::spatial::index::StopNode;
use crate::spatial::queries::{haversine_distance, meters_to_degrees_approx, meters_to_lon_degrees_approx};

/// A stop as seen across the whole schedule
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledStop {
    pub id: StopIdentifier,
    pub name: Arc<str>,
    /// x = longitude, y = latitude
    pub location: Point,
    /// Routes with at least one trip calling here, in catalog order
    pub route_ids: Vec<RouteIdentifier>,
}

#[derive(Clone, Debug)]
pub struct NearbyStop {
    pub stop: Arc<ScheduledStop>,
    pub distance_m: f64,
}

/// This type is cheap to share since all data is stored in `Arc`s.
#[derive(Clone)]
pub struct Schedule {
    config: SimulationConfig,

    // Core data
    routes: Vec<Arc<Route>>,
    stops: Vec<Arc<ScheduledStop>>,

    // Lookup maps
    route_map: HashMap<RouteIdentifier, Arc<Route>>,
    trips_by_route: HashMap<RouteIdentifier, Vec<Arc<Trip>>>,
    trip_map: HashMap<TripIdentifier, Arc<Trip>>,
    stop_map: HashMap<StopIdentifier, Arc<ScheduledStop>>,

    // Spatial index
    stop_tree: RTree<StopNode>,
}

impl Schedule {
    /// Build the schedule from a route catalog with the default configuration
    pub fn initialize(catalog: impl IntoIterator<Item = RouteDefinition>) -> Result<Self> {
        Self::with_config(catalog, SimulationConfig::default())
    }

    /// Generate trips for every route in `catalog`.
    ///
    /// Fails on the first route whose pattern cannot produce a valid trip; no
    /// partial schedule is returned.
    pub fn with_config(
        catalog: impl IntoIterator<Item = RouteDefinition>,
        config: SimulationConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut routes = Vec::new();
        let mut trips = Vec::new();

        for definition in catalog {
            match &definition.pattern {
                Some(pattern) => trips.extend(generate_trips(&definition.route.id, pattern, &config)?),
                None => debug!(route = %definition.route.id, "route has no service pattern"),
            }
            routes.push(definition.route);
        }

        Self::from_parts(routes, trips, config)
    }

    /// Assemble a schedule from prebuilt routes and trips.
    ///
    /// Every trip must belong to one of `routes`; route and trip ids must be unique.
    pub fn from_parts(routes: Vec<Route>, trips: Vec<Trip>, config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let routes: Vec<Arc<Route>> = routes.into_iter().map(Arc::new).collect();

        let mut route_map = HashMap::with_capacity(routes.len());
        for route in &routes {
            if route_map.insert(route.id.clone(), route.clone()).is_some() {
                return Err(SimulationError::DuplicateRoute(route.id.clone()));
            }
        }

        let mut trips_by_route: HashMap<RouteIdentifier, Vec<Arc<Trip>>> = HashMap::new();
        let mut trip_map = HashMap::with_capacity(trips.len());
        for trip in trips {
            if !route_map.contains_key(trip.route_id()) {
                return Err(SimulationError::RouteNotFound(trip.route_id().clone()));
            }

            let trip = Arc::new(trip);
            if trip_map.insert(trip.id().clone(), trip.clone()).is_some() {
                return Err(SimulationError::InvalidTrip {
                    trip_id: trip.id().clone(),
                    reason: "duplicate trip id".into(),
                });
            }
            trips_by_route.entry(trip.route_id().clone()).or_default().push(trip);
        }

        let stops = index_stops(&routes, &trips_by_route);
        let stop_map: HashMap<_, _> = stops.iter().map(|s| (s.id.clone(), s.clone())).collect();

        // Build spatial index
        let stop_tree = RTree::bulk_load(
            stops
                .iter()
                .map(|s| StopNode::new(s.location, s.clone()))
                .collect(),
        );

        info!(
            routes = routes.len(),
            trips = trip_map.len(),
            stops = stops.len(),
            "schedule initialized"
        );

        Ok(Self {
            config,
            routes,
            stops,
            route_map,
            trips_by_route,
            trip_map,
            stop_map,
            stop_tree,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    // ---- Lookups ----

    pub fn route(&self, id: &RouteIdentifier) -> Option<&Arc<Route>> {
        self.route_map.get(id)
    }

    pub fn trip(&self, id: &TripIdentifier) -> Option<&Arc<Trip>> {
        self.trip_map.get(id)
    }

    pub fn stop(&self, id: &StopIdentifier) -> Option<&Arc<ScheduledStop>> {
        self.stop_map.get(id)
    }

    // ---- Collections ----

    /// All routes in catalog order
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// All trips of a route in generation order; empty for unknown or display-only routes
    pub fn trips(&self, route_id: &RouteIdentifier) -> &[Arc<Trip>] {
        self.trips_by_route
            .get(route_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn stops(&self) -> &[Arc<ScheduledStop>] {
        &self.stops
    }

    pub fn trip_count(&self) -> usize {
        self.trip_map.len()
    }

    // ---- Queries ----

    /// Trips of `route_id` in service at `now` on `day`
    pub fn active_trips(&self, route_id: &RouteIdentifier, now: ServiceTime, day: Weekday) -> Vec<&Arc<Trip>> {
        activation::active_trips(self.trips(route_id), now, day)
    }

    /// Stops within `radius_m` meters of `point`, nearest first
    pub fn stops_near(&self, point: Point, radius_m: f64) -> Vec<NearbyStop> {
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        // padded so the box never clips the haversine circle
        let padded = radius_m * 1.01;
        let d_lat = meters_to_degrees_approx(padded);
        let d_lon = meters_to_lon_degrees_approx(padded, point.y());
        let envelope = AABB::from_corners(
            [point.x() - d_lon, point.y() - d_lat],
            [point.x() + d_lon, point.y() + d_lat],
        );

        let mut nearby: Vec<NearbyStop> = self
            .stop_tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|node| NearbyStop {
                stop: node.stop.clone(),
                distance_m: haversine_distance(point, node.stop.location),
            })
            .filter(|candidate| candidate.distance_m <= radius_m)
            .collect();

        nearby.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        nearby
    }

    /// The `n` stops nearest to `point`
    pub fn nearest_stops(&self, point: Point, n: usize) -> Vec<Arc<ScheduledStop>> {
        self.stop_tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(n)
            .map(|node| node.stop.clone())
            .collect()
    }
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schedule")
            .field("config", &self.config)
            .field("routes", &self.routes.len())
            .field("trips", &self.trip_map.len())
            .field("stops", &self.stops.len())
            .finish_non_exhaustive()
    }
}

/// Distinct stops over all trips; the first occurrence fixes name and location.
fn index_stops(
    routes: &[Arc<Route>],
    trips_by_route: &HashMap<RouteIdentifier, Vec<Arc<Trip>>>,
) -> Vec<Arc<ScheduledStop>> {
    let mut order: Vec<ScheduledStop> = Vec::new();
    let mut positions: HashMap<StopIdentifier, usize> = HashMap::new();

    for route in routes {
        let Some(trips) = trips_by_route.get(&route.id) else {
            continue;
        };

        for stop_time in trips.iter().flat_map(|t| t.stop_times()) {
            let index = *positions.entry(stop_time.stop_id.clone()).or_insert_with(|| {
                order.push(ScheduledStop {
                    id: stop_time.stop_id.clone(),
                    name: stop_time.name.clone(),
                    location: stop_time.location,
                    route_ids: Vec::new(),
                });
                order.len() - 1
            });

            let served_by = &mut order[index].route_ids;
            if !served_by.contains(&route.id) {
                served_by.push(route.id.clone());
            }
        }
    }

    order.into_iter().map(Arc::new).collect()
}
