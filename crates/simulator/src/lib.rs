//! # transit-simulator
//!
//! Simulated real-time vehicle positions derived from a static timetable.
//!
//! ## Features
//!
//! - **Trip generation**: expand a route's stop pattern and headway into a full
//!   service day in both directions
//! - **Activation windows**: calendar-aware selection of trips in service
//! - **Interpolation**: position, heading, and speed between bracketing stops
//! - **Occupancy**: time-of-day crowding heuristic with an injectable RNG
//! - **Spatial queries**: R-tree backed nearby-stop lookups
//!
//! The [`Schedule`] is built once and never mutated; every snapshot is a pure
//! function of the schedule, the wall-clock time, and the random source.
//!
//! ## Example
//!
//! ```
//! use transit_simulator::prelude::*;
//! use chrono::NaiveDate;
//!
//! let schedule = Schedule::initialize(catalog::milan())?;
//!
//! // Wednesday morning
//! let now = NaiveDate::from_ymd_opt(2024, 3, 13)
//!     .unwrap()
//!     .and_hms_opt(8, 15, 0)
//!     .unwrap();
//!
//! let vehicles = snapshot(&schedule, now);
//! assert!(!vehicles.is_empty());
//! assert!(vehicles.iter().all(|v| (10.0..=50.0).contains(&v.speed_kmh)));
//! # Ok::<(), SimulationError>(())
//! ```

pub mod config;
pub mod identifiers;
pub mod models;
pub mod schedule;
pub mod simulation;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::{SimulationConfig, WeekendService};
    pub use crate::identifiers::*;
    pub use crate::models::*;
    pub use crate::schedule::{
        catalog, NearbyStop, RouteDefinition, Schedule, ScheduledStop, ServicePattern, StopDefinition,
    };
    pub use crate::simulation::{
        snapshot, snapshot_for_routes, snapshot_with_rng, OccupancyLevel, VehicleSnapshot,
    };
}

pub use prelude::*;

/// Build the schedule for `catalog` with the default configuration
pub fn initialize(catalog: impl IntoIterator<Item = RouteDefinition>) -> Result<Schedule> {
    Schedule::initialize(catalog)
}
