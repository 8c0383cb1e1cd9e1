//! Core data types and enums for schedule data.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;
use crate::models::calendar::ServiceCalendar;
use crate::models::time::ServiceTime;

// ============================================================================
// Enums
// ============================================================================

/// Kind of vehicle serving a route
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VehicleKind {
    Metro,
    Tram,
    Bus,
}

/// Trip direction along a route's stop pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Outbound, Direction::Inbound];
}

// ============================================================================
// Data Structures
// ============================================================================

/// A transit route (e.g., tram "1", metro "M2")
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub id: RouteIdentifier,
    pub display_name: Arc<str>,
    pub kind: VehicleKind,
    /// Display color, hex RGB with leading `#`
    pub color: Arc<str>,
}

impl Route {
    pub fn new(
        id: impl Into<RouteIdentifier>,
        display_name: impl Into<Arc<str>>,
        kind: VehicleKind,
        color: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            kind,
            color: color.into(),
        }
    }
}

/// One scheduled visit of a trip to a stop
#[derive(Clone, Debug, PartialEq)]
pub struct StopTime {
    pub stop_id: StopIdentifier,
    pub name: Arc<str>,
    /// x = longitude, y = latitude
    pub location: Point,
    pub time: ServiceTime,
}

impl StopTime {
    pub fn lat(&self) -> f64 {
        self.location.y()
    }

    pub fn lon(&self) -> f64 {
        self.location.x()
    }
}

/// A single run of a vehicle along a route's stop sequence.
///
/// Stop times are guaranteed to be at least two long and strictly increasing
/// in time; [`Trip::new`] refuses anything else.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    id: TripIdentifier,
    route_id: RouteIdentifier,
    headsign: Arc<str>,
    calendar: ServiceCalendar,
    direction: Direction,
    stop_times: Vec<StopTime>,
}

impl Trip {
    pub fn new(
        id: TripIdentifier,
        route_id: RouteIdentifier,
        headsign: impl Into<Arc<str>>,
        calendar: ServiceCalendar,
        direction: Direction,
        stop_times: Vec<StopTime>,
    ) -> Result<Self> {
        if stop_times.len() < 2 {
            return Err(SimulationError::InvalidTrip {
                trip_id: id,
                reason: format!("needs at least 2 stop times, got {}", stop_times.len()),
            });
        }

        if let Some(bad) = stop_times.iter().find(|st| !st.time.minutes().is_finite()) {
            return Err(SimulationError::InvalidTrip {
                trip_id: id,
                reason: format!("stop {} has a non-finite time", bad.stop_id),
            });
        }

        if let Some(pair) = stop_times.windows(2).find(|w| w[1].time <= w[0].time) {
            return Err(SimulationError::InvalidTrip {
                trip_id: id,
                reason: format!(
                    "stop times must strictly increase: {} at {} is followed by {} at {}",
                    pair[0].stop_id,
                    pair[0].time.minutes(),
                    pair[1].stop_id,
                    pair[1].time.minutes()
                ),
            });
        }

        Ok(Self {
            id,
            route_id,
            headsign: headsign.into(),
            calendar,
            direction,
            stop_times,
        })
    }

    pub fn id(&self) -> &TripIdentifier {
        &self.id
    }

    pub fn route_id(&self) -> &RouteIdentifier {
        &self.route_id
    }

    /// Display destination (e.g., "Greco")
    pub fn headsign(&self) -> &str {
        &self.headsign
    }

    pub fn calendar(&self) -> ServiceCalendar {
        self.calendar
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Ordered stop times for this trip
    pub fn stop_times(&self) -> &[StopTime] {
        &self.stop_times
    }

    pub fn first_stop_time(&self) -> &StopTime {
        &self.stop_times[0]
    }

    pub fn last_stop_time(&self) -> &StopTime {
        &self.stop_times[self.stop_times.len() - 1]
    }

    /// Same trip under another calendar and id
    pub(crate) fn with_calendar(&self, id: TripIdentifier, calendar: ServiceCalendar) -> Self {
        Self {
            id,
            calendar,
            ..self.clone()
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid route definition for {route_id}: {reason}")]
    InvalidRouteDefinition {
        route_id: RouteIdentifier,
        reason: String,
    },

    #[error("Invalid trip {trip_id}: {reason}")]
    InvalidTrip {
        trip_id: TripIdentifier,
        reason: String,
    },

    #[error("Duplicate route: {0}")]
    DuplicateRoute(RouteIdentifier),

    #[error("Route not found: {0}")]
    RouteNotFound(RouteIdentifier),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
