//! PNG encoding of heightmap pixel grids.

use crate::{HmapgenError, Result};
use hmapgen_core::PixelGrid;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, Luma};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write `pixels` as a 16-bit grayscale PNG.
///
/// Uses fast compression; heightmaps are mostly consumed by other tools, so
/// encoding speed matters more than file size.
pub fn write_png(path: &Path, pixels: &PixelGrid) -> Result<()> {
    let width = dimension(pixels.width())?;
    let height = dimension(pixels.height())?;

    let buffer: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(width, height, pixels.as_slice().to_vec()).ok_or_else(|| {
            HmapgenError::Config(format!(
                "pixel buffer does not match {}x{} image",
                width, height
            ))
        })?;

    let file = File::create(path)?;
    let encoder = PngEncoder::new_with_quality(
        BufWriter::new(file),
        CompressionType::Fast,
        FilterType::Adaptive,
    );
    buffer.write_with_encoder(encoder)?;
    Ok(())
}

fn dimension(size: usize) -> Result<u32> {
    u32::try_from(size)
        .map_err(|_| HmapgenError::Config(format!("image dimension {} is too large", size)))
}
