//! # hmapgen-core
//!
//! Turns a geographic bounding box into a 16-bit grayscale heightmap.
//!
//! ## Overview
//!
//! 1. A [`Surface`] divides the [`Bound`] into cells of `precision` meters.
//! 2. The batcher walks every cell in grid-index order and asks an
//!    [`ElevationSource`] for heights, at most
//!    [`max_points_per_request`](ElevationSource::max_points_per_request)
//!    points at a time.
//! 3. [`min_max`] finds the elevation range.
//! 4. [`rasterize`] scales each height to `0..=65535` and draws it with the
//!    north edge on row 0.
//!
//! Elevation sources are plain trait objects, so the HTTP clients live in a
//! separate crate and tests can use in-memory stubs.
//!
//! ## Example
//!
//! ```
//! use hmapgen_core::{generate, Bound, ElevationSource, NoProgress, Point, SourceError};
//!
//! struct Ramp;
//!
//! impl ElevationSource for Ramp {
//!     fn name(&self) -> &str { "ramp" }
//!     fn max_points_per_request(&self) -> usize { 3 }
//!     fn elevations(&self, points: &[Point]) -> Result<Vec<f64>, SourceError> {
//!         Ok(points.iter().map(|p| (p.lat - 45.0) * 10_000.0).collect())
//!     }
//! }
//!
//! let bound = Bound::new(5.0, 45.0, 5.02, 45.01);
//! let map = generate(bound, 550.0, &Ramp, &mut NoProgress)?;
//! assert_eq!((map.pixels.width(), map.pixels.height()), (2, 2));
//! // North row is brightest
//! assert_eq!(map.pixels.get(0, 0), u16::MAX);
//! assert_eq!(map.pixels.get(0, 1), 0);
//! # Ok::<(), hmapgen_core::HeightmapError>(())
//! ```

mod batch;
mod error;
mod geo;
mod normalize;
mod pipeline;
mod progress;
mod raster;
mod source;
mod surface;

pub use batch::{calls_required, plan_chunks, sample, sample_with_limit};
pub use error::HeightmapError;
pub use geo::{haversine_distance, Bound, Point, EARTH_RADIUS_M, WIRE_DECIMALS};
pub use normalize::{min_max, HeightRange};
pub use pipeline::{generate, Heightmap};
pub use progress::{ChunkReport, NoProgress, ProgressObserver};
pub use raster::{grayscale, rasterize, PixelGrid, GRAY_MAX, GRAY_MIN};
pub use source::{ElevationSource, SourceError};
pub use surface::{GridCoord, Surface};

/// Result type for heightmap operations.
pub type Result<T> = std::result::Result<T, HeightmapError>;
