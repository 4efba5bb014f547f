//! Track: an ordered sequence of segments with optional metadata
//!
//! Metadata fields keep the difference between an absent element (`None`) and an
//! empty one (`Some("")`).

use crate::{Segment, SpatialBounds, Summary, TemporalBounds};

/// Ordered sequence of segments
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    name: Option<String>,
    comment: Option<String>,
    description: Option<String>,
    number: Option<u32>,
    kind: Option<String>,
    segments: Vec<Segment>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Track {
    /// Create an unnamed track
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_number(mut self, number: Option<u32>) -> Self {
        self.number = number;
        self
    }

    /// Activity type, the GPX `<type>` element
    pub fn with_kind(mut self, kind: Option<String>) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// GPS track number
    #[inline]
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    #[inline]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Segment::point_count).sum()
    }

    /// Sum of the segments' 2D lengths; no distance is counted between segments
    pub fn length_2d(&self) -> f64 {
        self.segments.iter().map(Segment::length_2d).sum()
    }

    /// Sum of the segments' 3D lengths
    pub fn length_3d(&self) -> f64 {
        self.segments.iter().map(Segment::length_3d).sum()
    }

    pub fn bounds(&self) -> SpatialBounds {
        self.segments
            .iter()
            .fold(SpatialBounds::empty(), |acc, segment| {
                acc.union(&segment.bounds())
            })
    }

    pub fn time_bounds(&self) -> TemporalBounds {
        self.segments
            .iter()
            .fold(TemporalBounds::empty(), |acc, segment| {
                acc.merge(&segment.time_bounds())
            })
    }

    pub fn summary(&self) -> Summary {
        self.segments
            .iter()
            .map(Segment::summary)
            .fold(Summary::default(), |acc, summary| acc.merge(&summary))
    }
}
