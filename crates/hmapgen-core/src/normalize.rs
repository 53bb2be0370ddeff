//! Elevation range of a height sequence.

use crate::{HeightmapError, Result};

/// Lowest and highest sampled elevation, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightRange {
    /// Lowest elevation.
    pub min: f64,
    /// Highest elevation.
    pub max: f64,
}

impl HeightRange {
    /// Difference between the highest and lowest elevation.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when every sample has the same elevation.
    pub fn is_flat(&self) -> bool {
        self.span() == 0.0
    }
}

/// Find the minimum and maximum of `heights` in a single pass.
///
/// NaN samples are ignored. Fails if there is no comparable sample.
pub fn min_max(heights: &[f64]) -> Result<HeightRange> {
    heights
        .iter()
        .copied()
        .filter(|h| !h.is_nan())
        .fold(None, |acc: Option<HeightRange>, h| {
            Some(match acc {
                None => HeightRange { min: h, max: h },
                Some(r) => HeightRange {
                    min: r.min.min(h),
                    max: r.max.max(h),
                },
            })
        })
        .ok_or(HeightmapError::EmptyHeights)
}
