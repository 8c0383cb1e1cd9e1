//! Schedule data models and types.

pub mod calendar;
pub mod time;
pub mod types;

// Re-exports for convenience
pub use calendar::ServiceCalendar;
pub use time::{ServiceTime, MINUTES_PER_DAY};
pub use types::{Direction, Result, Route, SimulationError, StopTime, Trip, VehicleKind};
