//! Great-circle and elevation-aware distances
//!
//! Distances use the haversine formula on a sphere with the WGS84 equatorial radius.
//! This is a spherical approximation, not ellipsoidal geodesy.

use crate::Point;

/// WGS84 semi-major axis in meters, used as the sphere radius
pub const EARTH_RADIUS_M: f64 = 6378137.0;

/// Haversine distance in meters between two latitude/longitude pairs in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Great-circle distance between two points in meters, ignoring elevation
#[inline]
pub fn distance_2d(a: &Point, b: &Point) -> f64 {
    haversine_distance(a.latitude(), a.longitude(), b.latitude(), b.longitude())
}

/// Great-circle distance combined with the elevation delta as a straight line
///
/// Missing elevation counts as `0.0`.
#[inline]
pub fn distance_3d(a: &Point, b: &Point) -> f64 {
    let distance = distance_2d(a, b);
    let elevation_diff = a.elevation_or_zero() - b.elevation_or_zero();
    (distance * distance + elevation_diff * elevation_diff).sqrt()
}

/// Sum of 2D distances over consecutive points, in recording order
pub fn sequence_length_2d(points: &[Point]) -> f64 {
    sequence_length(points, distance_2d)
}

/// Sum of 3D distances over consecutive points, in recording order
pub fn sequence_length_3d(points: &[Point]) -> f64 {
    sequence_length(points, distance_3d)
}

#[inline]
fn sequence_length(points: &[Point], distance: fn(&Point, &Point) -> f64) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(&pair[0], &pair[1]))
        .sum()
}
