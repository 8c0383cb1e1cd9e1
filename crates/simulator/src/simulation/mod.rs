//! Per-tick simulation: activation, interpolation, occupancy, aggregation.

pub mod activation;
pub mod interpolation;
pub mod occupancy;
pub mod snapshot;

pub use activation::{active_trips, is_active};
pub use interpolation::{position_of, VehiclePosition};
pub use occupancy::{estimate_occupancy, OccupancyBand, OccupancyLevel};
pub use snapshot::{snapshot, snapshot_for_routes, snapshot_with_rng, VehicleSnapshot};
