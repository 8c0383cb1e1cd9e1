//! R-tree nodes for spatial indexing.
//!
//! ## Two-Stage Filtering
//!
//! Stop queries use a two-stage filtering approach:
//! 1. **R-tree filter**: a degree-space bounding box wide enough to contain the
//!    search radius at the query latitude
//! 2. **Haversine filter**: exact great-circle distance on the candidates
//!
//! Degree-space distance is only used to prune; it is never reported.

use geo::Point;
use rstar::{PointDistance, RTreeObject, AABB};
use std::sync::Arc;

use crate::schedule::repository::ScheduledStop;

#[derive(Clone, Debug)]
pub struct StopNode {
    pub stop: Arc<ScheduledStop>,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(location: Point, stop: Arc<ScheduledStop>) -> Self {
        Self {
            stop,
            point: [location.x(), location.y()],
        }
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}
