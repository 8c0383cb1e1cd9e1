//! Geodesy helpers for distance and bearing calculations.
//!
//! Points follow the geo convention: x = longitude, y = latitude, in degrees.

use geo::{HaversineBearing, Point};

/// Mean Earth radius used by the schedule engine. `geo`'s haversine uses
/// 6371.0088 km, so distances are computed here instead.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres (Haversine formula)
pub fn haversine_distance_km(p1: Point, p2: Point) -> f64 {
    let lat1 = p1.y().to_radians();
    let lat2 = p2.y().to_radians();
    let d_lat = (p2.y() - p1.y()).to_radians();
    let d_lon = (p2.x() - p1.x()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    haversine_distance_km(p1, p2) * 1000.0
}

/// Initial compass bearing from `from` to `to`, in degrees within `[0, 360)`
pub fn initial_bearing(from: Point, to: Point) -> f64 {
    normalize_degrees(from.haversine_bearing(to))
}

/// Fold an angle into `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(360.0);
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// Convert meters to degrees of latitude (for bounding box queries)
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    meters / 111_320.0
}

/// Convert meters to degrees of longitude at `latitude`, never less than the
/// latitude conversion (for bounding box queries)
pub fn meters_to_lon_degrees_approx(meters: f64, latitude: f64) -> f64 {
    let cos_lat = latitude.to_radians().cos().abs().max(0.01);
    meters_to_degrees_approx(meters) / cos_lat
}
