//! End-to-end heightmap generation: grid, sampling, normalization, raster.

use crate::batch::{calls_required, sample};
use crate::geo::Bound;
use crate::normalize::{min_max, HeightRange};
use crate::progress::ProgressObserver;
use crate::raster::{rasterize, PixelGrid};
use crate::source::ElevationSource;
use crate::surface::Surface;
use crate::Result;
use tracing::info;

/// A fully sampled and rasterized heightmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    /// Grid the heights were sampled on.
    pub surface: Surface,
    /// Elevation range used for the gray scale.
    pub range: HeightRange,
    /// Gray values, north edge first.
    pub pixels: PixelGrid,
}

impl Heightmap {
    /// Elevation difference between the lowest and highest sample,
    /// truncated to whole meters.
    pub fn height_offset(&self) -> i64 {
        self.range.span() as i64
    }
}

/// Sample `bound` every `precision` meters from `source` and rasterize the result.
///
/// Any error aborts the run; no partial heightmap is returned.
pub fn generate<S, O>(
    bound: Bound,
    precision: f64,
    source: &S,
    observer: &mut O,
) -> Result<Heightmap>
where
    S: ElevationSource + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let surface = Surface::new(bound, precision)?;
    info!(
        "Surface: {}x{} - {} calls required ({})",
        surface.width(),
        surface.height(),
        calls_required(surface.len(), source.max_points_per_request()),
        source.name()
    );

    let heights = sample(&surface, source, observer)?;
    let range = min_max(&heights)?;
    info!("min max: {:.2}x{:.2}", range.min, range.max);

    let pixels = rasterize(&surface, &heights, &range)?;
    Ok(Heightmap {
        surface,
        range,
        pixels,
    })
}
