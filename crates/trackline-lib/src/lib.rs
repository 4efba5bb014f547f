//! Trackline Library - Core Computations for GPS Track Recordings
//!
//! This library computes the three things every consumer of a GPS recording needs:
//! path length (2D and 3D), spatial/temporal extents, and a compact polyline
//! encoding of the coordinates. It consumes points that were already lifted out of
//! a document by an external reader and never performs I/O itself.
//!
//! # Architecture
//!
//! - **[`Point`]**: A single geographic sample
//! - **[`SpatialBounds`]** / **[`TemporalBounds`]**: Streaming min/max accumulators
//! - **[`Segment`]**, **[`Track`]**, **[`Collection`]**: The recording hierarchy,
//!   aggregating lengths and bounds bottom-up on demand
//! - **[`polyline`]**: Precision-parameterized polyline codec
//!
//! # Performance Characteristics
//!
//! - **Lengths and bounds**: O(N) single pass, no allocation
//! - **Polyline**: O(N) encode and decode
//! - **Many collections**: [`summarize_all`] runs one task per collection

mod bounds;
mod collection;
pub mod distance;
mod import;
mod point;
pub mod polyline;
mod segment;
mod time_bounds;
mod track;
pub mod utils;

// Public API exports
pub use bounds::SpatialBounds;
pub use collection::{Collection, Summary, summarize_all};
pub use import::Config;
pub use point::Point;
pub use polyline::Precision;
pub use segment::Segment;
pub use time_bounds::TemporalBounds;
pub use track::Track;

/// Error types for the library
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("Invalid precision {0}: expected 5 or 6")]
    InvalidPrecision(i64),

    #[error("Invalid bounds argument `{argument}`: {reason}")]
    InvalidBounds {
        argument: &'static str,
        reason: String,
    },

    #[error("Malformed polyline at byte {position}: {reason}")]
    MalformedPolyline {
        position: usize,
        reason: &'static str,
    },

    #[error("Invalid coordinate ({latitude}, {longitude}): expected latitude in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

pub type Result<T> = std::result::Result<T, DataError>;
