//! Conversion of heights to a 16-bit grayscale pixel grid.

use crate::normalize::HeightRange;
use crate::surface::Surface;
use crate::{HeightmapError, Result};

/// Gray level of the lowest sample.
pub const GRAY_MIN: u16 = 0;

/// Gray level of the highest sample.
pub const GRAY_MAX: u16 = u16::MAX;

/// Map `value` linearly from `range` onto `[GRAY_MIN, GRAY_MAX]`.
///
/// Flat terrain (`range.min == range.max`) maps every value to `GRAY_MIN`.
/// Values outside the range saturate.
pub fn grayscale(value: f64, range: &HeightRange) -> u16 {
    if range.is_flat() {
        return GRAY_MIN;
    }
    let scale = f64::from(GRAY_MAX) / range.span();
    // `as` saturates, and NaN becomes 0
    ((value - range.min) * scale).round() as u16
}

/// Single-channel 16-bit image, row-major with row 0 at the top (north).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<u16>,
}

impl PixelGrid {
    /// Create a grid filled with `GRAY_MIN`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![GRAY_MIN; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Gray value at `(column, row)`.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn get(&self, column: usize, row: usize) -> u16 {
        self.data[self.offset(column, row)]
    }

    /// Set the gray value at `(column, row)`.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn set(&mut self, column: usize, row: usize, value: u16) {
        let offset = self.offset(column, row);
        self.data[offset] = value;
    }

    /// One row of pixels, west to east.
    pub fn row(&self, row: usize) -> &[u16] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    /// All pixels, row-major.
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    /// Consume the grid and return its pixels, row-major.
    pub fn into_vec(self) -> Vec<u16> {
        self.data
    }

    fn offset(&self, column: usize, row: usize) -> usize {
        assert!(
            column < self.width && row < self.height,
            "pixel ({}, {}) out of range for {}x{} grid",
            column,
            row,
            self.width,
            self.height
        );
        row * self.width + column
    }
}

/// Draw every height of `surface` into a new pixel grid.
///
/// `heights[i]` is the elevation of grid index `i`; it lands on
/// [`Surface::raster_position`] so the northernmost row is image row 0.
pub fn rasterize(surface: &Surface, heights: &[f64], range: &HeightRange) -> Result<PixelGrid> {
    if heights.len() != surface.len() {
        return Err(HeightmapError::GridSizeMismatch {
            expected: surface.len(),
            actual: heights.len(),
        });
    }

    let mut grid = PixelGrid::new(surface.width(), surface.height());
    for (index, &height) in heights.iter().enumerate() {
        let (column, row) = surface.raster_position(index);
        grid.set(column, row, grayscale(height, range));
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Bound;

    fn range(min: f64, max: f64) -> HeightRange {
        HeightRange { min, max }
    }

    #[test]
    fn test_grayscale_endpoints() {
        let r = range(10.0, 40.0);
        assert_eq!(grayscale(10.0, &r), 0);
        assert_eq!(grayscale(40.0, &r), 65535);
        assert_eq!(grayscale(25.0, &r), 32768);
    }

    #[test]
    fn test_grayscale_is_monotonic() {
        let r = range(-412.0, 4808.0);
        let mut previous = 0;
        for step in 0..=1000 {
            let value = r.min + r.span() * step as f64 / 1000.0;
            let gray = grayscale(value, &r);
            assert!(gray >= previous, "{} -> {} after {}", value, gray, previous);
            previous = gray;
        }
        assert_eq!(previous, GRAY_MAX);
    }

    #[test]
    fn test_grayscale_flat_terrain() {
        let r = range(100.0, 100.0);
        assert_eq!(grayscale(100.0, &r), GRAY_MIN);
    }

    #[test]
    fn test_grayscale_saturates_out_of_range() {
        let r = range(0.0, 10.0);
        assert_eq!(grayscale(-5.0, &r), 0);
        assert_eq!(grayscale(20.0, &r), u16::MAX);
    }

    #[test]
    fn test_rasterize_puts_north_on_top() {
        let surface = Surface::new(Bound::new(5.0, 45.0, 5.02, 45.01), 550.0).unwrap();
        let heights = [10.0, 20.0, 30.0, 40.0];
        let grid = rasterize(&surface, &heights, &range(10.0, 40.0)).unwrap();

        assert_eq!((grid.width(), grid.height()), (2, 2));
        // South row (indices 0, 1) is the bottom image row
        assert_eq!(grid.row(1), &[0, 21845]);
        assert_eq!(grid.row(0), &[43690, 65535]);
        assert_eq!(grid.as_slice(), &[43690, 65535, 0, 21845]);
    }

    #[test]
    fn test_rasterize_length_mismatch() {
        let surface = Surface::new(Bound::new(5.0, 45.0, 5.02, 45.01), 550.0).unwrap();
        assert!(matches!(
            rasterize(&surface, &[1.0, 2.0], &range(1.0, 2.0)),
            Err(HeightmapError::GridSizeMismatch {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_pixel_grid_access() {
        let mut grid = PixelGrid::new(3, 2);
        grid.set(2, 1, 7);
        assert_eq!(grid.get(2, 1), 7);
        assert_eq!(grid.row(1), &[0, 0, 7]);
        assert_eq!(grid.into_vec(), vec![0, 0, 0, 0, 0, 7]);
    }
}
