//! Spatial bounds accumulator
//!
//! Tracks the component-wise minimum and maximum of every absorbed point. This is a
//! plain min/max per axis and does not treat tracks crossing the antimeridian specially.

use crate::{DataError, Point, Result};
use geo::Rect;
use std::fmt;

/// Axis-aligned latitude/longitude (and elevation) box over a set of points
///
/// Empty until the first point is absorbed. Elevation is tracked only while every
/// absorbed point carried one. Corners never carry a timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialBounds {
    min: Option<Point>,
    max: Option<Point>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl SpatialBounds {
    /// The identity element: no point absorbed yet
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build bounds from two corners
    ///
    /// Fails if `min` is greater than `max` on any axis both carry.
    pub fn from_corners(min: Point, max: Point) -> Result<Self> {
        if min.latitude() > max.latitude() {
            return Err(invalid("min", "latitude is greater than max latitude"));
        }
        if min.longitude() > max.longitude() {
            return Err(invalid("min", "longitude is greater than max longitude"));
        }
        if let (Some(lo), Some(hi)) = (min.elevation(), max.elevation()) {
            if lo > hi {
                return Err(invalid("min", "elevation is greater than max elevation"));
            }
        }

        Ok(Self {
            min: Some(min.without_timestamp()),
            max: Some(max.without_timestamp()),
        })
    }

    /// Build bounds from raw `[lat, lon]` or `[lat, lon, ele]` components
    pub fn from_components(min: &[f64], max: &[f64]) -> Result<Self> {
        let min_point = point_from_components("min", min)?;
        let max_point = point_from_components("max", max)?;
        if min.len() != max.len() {
            return Err(invalid(
                "max",
                format!(
                    "has {} components but min has {}",
                    max.len(),
                    min.len()
                ),
            ));
        }
        Self::from_corners(min_point, max_point)
    }

    /// Build bounds over a sequence of points
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut bounds = Self::empty();
        for point in points {
            bounds.add_point(point);
        }
        bounds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Always the negation of [`SpatialBounds::is_empty`]
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_empty()
    }

    /// Widen the bounds to contain `point`
    pub fn add_point(&mut self, point: &Point) {
        let (min, max) = match self.corners() {
            Some((min, max)) => (
                combine_corners(min, point, f64::min),
                combine_corners(max, point, f64::max),
            ),
            None => (point.without_timestamp(), point.without_timestamp()),
        };
        self.min = Some(min);
        self.max = Some(max);
    }

    /// Fold form of [`SpatialBounds::add_point`]
    #[inline]
    pub fn with_point(mut self, point: &Point) -> Self {
        self.add_point(point);
        self
    }

    /// Widen the bounds to contain `other`
    pub fn add_bounds(&mut self, other: &SpatialBounds) {
        *self = self.union(other);
    }

    /// Smallest bounds containing both operands
    ///
    /// Commutative and associative; an empty operand returns the other one.
    pub fn union(&self, other: &SpatialBounds) -> SpatialBounds {
        match (self.corners(), other.corners()) {
            (None, _) => *other,
            (_, None) => *self,
            (Some((a_min, a_max)), Some((b_min, b_max))) => SpatialBounds {
                min: Some(combine_corners(a_min, b_min, f64::min)),
                max: Some(combine_corners(a_max, b_max, f64::max)),
            },
        }
    }

    #[inline]
    pub fn min(&self) -> Option<&Point> {
        self.min.as_ref()
    }

    #[inline]
    pub fn max(&self) -> Option<&Point> {
        self.max.as_ref()
    }

    #[inline]
    pub fn min_latitude(&self) -> Option<f64> {
        self.min.as_ref().map(Point::latitude)
    }

    #[inline]
    pub fn min_longitude(&self) -> Option<f64> {
        self.min.as_ref().map(Point::longitude)
    }

    #[inline]
    pub fn max_latitude(&self) -> Option<f64> {
        self.max.as_ref().map(Point::latitude)
    }

    #[inline]
    pub fn max_longitude(&self) -> Option<f64> {
        self.max.as_ref().map(Point::longitude)
    }

    /// Move the minimum corner's latitude
    ///
    /// Like the other corner setters this fails on empty bounds, or when the new value
    /// would put the minimum above the maximum.
    pub fn set_min_latitude(&mut self, latitude: f64) -> Result<()> {
        self.replace_corner("min_latitude", |min, max| {
            (relocated(min, latitude, min.longitude()), *max)
        })
    }

    pub fn set_min_longitude(&mut self, longitude: f64) -> Result<()> {
        self.replace_corner("min_longitude", |min, max| {
            (relocated(min, min.latitude(), longitude), *max)
        })
    }

    pub fn set_max_latitude(&mut self, latitude: f64) -> Result<()> {
        self.replace_corner("max_latitude", |min, max| {
            (*min, relocated(max, latitude, max.longitude()))
        })
    }

    pub fn set_max_longitude(&mut self, longitude: f64) -> Result<()> {
        self.replace_corner("max_longitude", |min, max| {
            (*min, relocated(max, max.latitude(), longitude))
        })
    }

    /// The bounds as a `geo::Rect` (x = longitude, y = latitude)
    pub fn to_rect(&self) -> Option<Rect<f64>> {
        let (min, max) = self.corners()?;
        Some(Rect::new(
            geo::Coord {
                x: min.longitude(),
                y: min.latitude(),
            },
            geo::Coord {
                x: max.longitude(),
                y: max.latitude(),
            },
        ))
    }

    #[inline]
    fn corners(&self) -> Option<(&Point, &Point)> {
        Some((self.min.as_ref()?, self.max.as_ref()?))
    }

    fn replace_corner(
        &mut self,
        argument: &'static str,
        update: impl FnOnce(&Point, &Point) -> (Point, Point),
    ) -> Result<()> {
        let (min, max) = self
            .corners()
            .map(|(min, max)| update(min, max))
            .ok_or_else(|| invalid(argument, "bounds are empty"))?;
        *self = Self::from_corners(min, max).map_err(|err| match err {
            DataError::InvalidBounds { reason, .. } => invalid(argument, reason),
            other => other,
        })?;
        Ok(())
    }
}

impl<'a> FromIterator<&'a Point> for SpatialBounds {
    fn from_iter<I: IntoIterator<Item = &'a Point>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

impl fmt::Display for SpatialBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.corners() {
            None => write!(f, "Bounds(empty)"),
            Some((min, max)) => {
                write!(f, "Bounds(min=")?;
                crate::point::write_coords(f, min)?;
                write!(f, ", max=")?;
                crate::point::write_coords(f, max)?;
                write!(f, ")")
            }
        }
    }
}

/// Component-wise combination of two corners; elevation survives only if both have one
#[inline]
fn combine_corners(a: &Point, b: &Point, pick: fn(f64, f64) -> f64) -> Point {
    let latitude = pick(a.latitude(), b.latitude());
    let longitude = pick(a.longitude(), b.longitude());
    match (a.elevation(), b.elevation()) {
        (Some(ea), Some(eb)) => Point::with_elevation(latitude, longitude, pick(ea, eb)),
        _ => Point::new(latitude, longitude),
    }
}

/// Same elevation, new latitude/longitude
#[inline]
fn relocated(corner: &Point, latitude: f64, longitude: f64) -> Point {
    match corner.elevation() {
        Some(elevation) => Point::with_elevation(latitude, longitude, elevation),
        None => Point::new(latitude, longitude),
    }
}

fn point_from_components(argument: &'static str, components: &[f64]) -> Result<Point> {
    match *components {
        [lat, lon] => Ok(Point::new(lat, lon)),
        [lat, lon, ele] => Ok(Point::with_elevation(lat, lon, ele)),
        _ => Err(invalid(
            argument,
            format!(
                "expected 2 (lat, lon) or 3 (lat, lon, ele) components, got {}",
                components.len()
            ),
        )),
    }
}

fn invalid(argument: &'static str, reason: impl Into<String>) -> DataError {
    DataError::InvalidBounds {
        argument,
        reason: reason.into(),
    }
}
