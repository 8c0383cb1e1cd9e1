//! Schedule construction and storage.

pub mod catalog;
pub mod generator;
pub mod repository;

pub use catalog::{RouteDefinition, ServicePattern, StopDefinition};
pub use generator::generate_trips;
pub use repository::{NearbyStop, Schedule, ScheduledStop};
