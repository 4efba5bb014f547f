//! Segment: an ordered run of points in recording order

use crate::distance::{self, distance_2d, distance_3d};
use crate::polyline::{self, Precision};
use crate::{Point, Result, SpatialBounds, Summary, TemporalBounds};

/// Ordered sequence of points, never re-sorted
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    points: Vec<Point>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Segment {
    /// Create a segment from points in recording order
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Great-circle length in meters
    pub fn length_2d(&self) -> f64 {
        distance::sequence_length_2d(&self.points)
    }

    /// Length in meters including elevation changes
    pub fn length_3d(&self) -> f64 {
        distance::sequence_length_3d(&self.points)
    }

    pub fn bounds(&self) -> SpatialBounds {
        SpatialBounds::from_points(&self.points)
    }

    /// Bounds over the timestamps of the points that carry one
    pub fn time_bounds(&self) -> TemporalBounds {
        self.points.iter().filter_map(Point::timestamp).collect()
    }

    /// Lengths and bounds computed in a single pass over the points
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            point_count: self.points.len(),
            ..Summary::default()
        };

        let mut prev_point: Option<&Point> = None;
        for point in &self.points {
            summary.bounds.add_point(point);
            if let Some(timestamp) = point.timestamp() {
                summary.time_bounds.add_instant(timestamp);
            }
            if let Some(prev) = prev_point {
                summary.length_2d += distance_2d(prev, point);
                summary.length_3d += distance_3d(prev, point);
            }
            prev_point = Some(point);
        }

        summary
    }

    /// Encode the segment's coordinates as a polyline; elevation and time are dropped
    pub fn encode_polyline(&self, precision: Precision) -> Result<String> {
        polyline::encode(&self.points, precision)
    }
}

impl From<Vec<Point>> for Segment {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for Segment {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
