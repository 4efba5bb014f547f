//! Collection - the whole parsed recording and its aggregated statistics
//!
//! Aggregation is computed bottom-up on demand from the owned tracks. Nothing is
//! cached, so independent collections can be summarized on separate threads without
//! any coordination.

use crate::{SpatialBounds, TemporalBounds, Track};

use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lengths, point count and bounds of a segment, track or collection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Summary {
    /// Number of points
    pub point_count: usize,
    /// Great-circle length in meters
    pub length_2d: f64,
    /// Length in meters including elevation changes
    pub length_3d: f64,
    /// Spatial extent
    pub bounds: SpatialBounds,
    /// Temporal extent
    pub time_bounds: TemporalBounds,
}

impl Summary {
    /// Additive combination of two summaries
    pub fn merge(&self, other: &Summary) -> Summary {
        Summary {
            point_count: self.point_count + other.point_count,
            length_2d: self.length_2d + other.length_2d,
            length_3d: self.length_3d + other.length_3d,
            bounds: self.bounds.union(&other.bounds),
            time_bounds: self.time_bounds.merge(&other.time_bounds),
        }
    }
}

/// Ordered sequence of tracks with an optional name
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Collection {
    name: Option<String>,
    tracks: Vec<Track>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Collection {
    /// Create an unnamed collection
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { name: None, tracks }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.tracks.iter().map(Track::point_count).sum()
    }

    /// Sum of the tracks' 2D lengths in meters
    pub fn length_2d(&self) -> f64 {
        self.tracks.iter().map(Track::length_2d).sum()
    }

    /// Sum of the tracks' 3D lengths in meters
    pub fn length_3d(&self) -> f64 {
        self.tracks.iter().map(Track::length_3d).sum()
    }

    pub fn bounds(&self) -> SpatialBounds {
        self.tracks
            .iter()
            .fold(SpatialBounds::empty(), |acc, track| acc.union(&track.bounds()))
    }

    pub fn time_bounds(&self) -> TemporalBounds {
        self.tracks
            .iter()
            .fold(TemporalBounds::empty(), |acc, track| {
                acc.merge(&track.time_bounds())
            })
    }

    /// All statistics in one pass over every point
    pub fn summary(&self) -> Summary {
        #[cfg(feature = "profiling")]
        profiling::scope!("collection::summary");

        self.tracks
            .iter()
            .map(Track::summary)
            .fold(Summary::default(), |acc, summary| acc.merge(&summary))
    }
}

/// Summarize many independent collections in parallel
///
/// Results are returned in the same order as the input.
pub fn summarize_all(collections: &[Collection]) -> Vec<Summary> {
    #[cfg(feature = "profiling")]
    profiling::scope!("collection::summarize_all");

    let summaries: Vec<Summary> = collections.par_iter().map(Collection::summary).collect();

    tracing::debug!(
        "Summarized {} collections ({} points)",
        summaries.len(),
        summaries.iter().map(|s| s.point_count).sum::<usize>()
    );

    summaries
}
