//! Error types for the heightmap pipeline.

use crate::source::SourceError;
use thiserror::Error;

/// Errors that can occur while building a heightmap.
#[derive(Debug, Error)]
pub enum HeightmapError {
    /// Bounding box is malformed (inverted, non-finite or off the globe).
    #[error("Invalid bound: {0}")]
    InvalidBound(String),

    /// Grid precision must be a finite distance greater than zero.
    #[error("Invalid precision {0} (must be a positive number of meters)")]
    InvalidPrecision(f64),

    /// Cell count of the grid does not fit in memory addressing.
    #[error("Grid of {width} x {height} cells is too large (reduce the area or raise the precision)")]
    GridTooLarge {
        /// Columns, saturated to `usize::MAX`.
        width: usize,
        /// Rows, saturated to `usize::MAX`.
        height: usize,
    },

    /// Batch limit is zero or larger than the source accepts.
    #[error("Invalid batch limit {limit} (source accepts 1-{max} points per request)")]
    InvalidBatchLimit {
        /// Requested limit.
        limit: usize,
        /// Limit declared by the elevation source.
        max: usize,
    },

    /// The elevation source failed while serving a chunk.
    #[error("Elevation source failed on chunk {chunk}: {source}")]
    Provider {
        /// Zero-based chunk number in request order.
        chunk: usize,
        /// Error reported by the source.
        #[source]
        source: SourceError,
    },

    /// The elevation source returned the wrong number of heights.
    #[error("Chunk {chunk} returned {actual} heights for {expected} points")]
    HeightCountMismatch {
        /// Zero-based chunk number in request order.
        chunk: usize,
        /// Number of points sent.
        expected: usize,
        /// Number of heights received.
        actual: usize,
    },

    /// A height sequence does not cover the surface it is drawn onto.
    #[error("Expected {expected} heights for the surface, got {actual}")]
    GridSizeMismatch {
        /// Number of grid cells.
        expected: usize,
        /// Number of heights supplied.
        actual: usize,
    },

    /// No heights to normalize (zero-sized grid or all NaN).
    #[error("No elevation samples to normalize")]
    EmptyHeights,
}
