//! Spatial indexing and geodesy utilities.

pub mod index;
pub mod queries;

pub use queries::{haversine_distance, haversine_distance_km, initial_bearing};
