//! A single geographic sample of a track recording

use std::fmt;
use time::OffsetDateTime;

/// Latitude/longitude in degrees with optional elevation (meters) and timestamp
///
/// Equality is exact component-wise floating point equality.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    latitude: f64,
    longitude: f64,
    elevation: Option<f64>,
    timestamp: Option<OffsetDateTime>,
}

impl Point {
    /// Create a point without elevation or timestamp
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            timestamp: None,
        }
    }

    /// Create a point carrying an elevation in meters
    #[inline]
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
            timestamp: None,
        }
    }

    /// Attach a timestamp to the point
    #[inline]
    pub fn at(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Elevation in meters, if the sample carried one
    #[inline]
    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    /// Elevation in meters, `0.0` when absent
    #[inline]
    pub fn elevation_or_zero(&self) -> f64 {
        self.elevation.unwrap_or(0.0)
    }

    #[inline]
    pub fn timestamp(&self) -> Option<OffsetDateTime> {
        self.timestamp
    }

    /// Convert to a `geo::Point` (x = longitude, y = latitude)
    #[inline]
    pub fn to_geo(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }

    /// Copy of this point with the timestamp dropped
    #[inline]
    pub(crate) fn without_timestamp(&self) -> Self {
        Self {
            timestamp: None,
            ..*self
        }
    }
}

impl From<geo::Point<f64>> for Point {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point")?;
        write_coords(f, self)
    }
}

/// Write `(lat, lon)` or `(lat, lon, ele)`
pub(crate) fn write_coords(f: &mut fmt::Formatter<'_>, point: &Point) -> fmt::Result {
    match point.elevation {
        Some(ele) => write!(f, "({}, {}, {})", point.latitude, point.longitude, ele),
        None => write!(f, "({}, {})", point.latitude, point.longitude),
    }
}
