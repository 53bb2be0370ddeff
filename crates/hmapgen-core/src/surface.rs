//! Sampling grid derived from a bounding box and a cell size.
//!
//! ## Index layout
//!
//! Grid indices are row-major starting at the south-west corner:
//! - `x` is the column (0 at the west edge, increases eastward)
//! - `y` is the row (0 at the south edge, increases northward)
//! - `index = y * width + x`
//!
//! Images are addressed top-down, so the pixel for cell `(x, y)` lives in
//! row `height - 1 - y`. Both the point list and the rasterizer go through
//! [`Surface::coordinate_of`], which keeps sampling and drawing aligned.

use crate::geo::{Bound, Point};
use crate::{HeightmapError, Result};

/// Column/row position of a grid cell, with `y` counted from the south edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Column, 0 at the west edge.
    pub x: usize,
    /// Row, 0 at the south edge.
    pub y: usize,
}

impl GridCoord {
    /// Create a grid coordinate.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A regular grid of sample points over a [`Bound`].
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    bound: Bound,
    precision: f64,
    width: usize,
    height: usize,
}

impl Surface {
    /// Build the grid for `bound` with one cell every `precision` meters.
    ///
    /// A valid bound smaller than a single cell yields a zero-sized surface.
    pub fn new(bound: Bound, precision: f64) -> Result<Self> {
        if !precision.is_finite() || precision <= 0.0 {
            return Err(HeightmapError::InvalidPrecision(precision));
        }
        bound.validate()?;

        let columns = (bound.geo_width() / precision).floor();
        let rows = (bound.geo_height() / precision).floor();
        let width = columns as usize;
        let height = rows as usize;
        // `as` saturates, so an oversized axis reads back as usize::MAX
        let fits = columns < usize::MAX as f64 && rows < usize::MAX as f64;
        if !fits || width.checked_mul(height).is_none() {
            return Err(HeightmapError::GridTooLarge { width, height });
        }

        Ok(Self {
            bound,
            precision,
            width,
            height,
        })
    }

    /// Geographic bound the grid covers.
    pub fn bound(&self) -> &Bound {
        &self.bound
    }

    /// Cell size in meters.
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when no points are sampled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid position of `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn coordinate_of(&self, index: usize) -> GridCoord {
        assert!(
            index < self.len(),
            "grid index {} out of range for {}x{} surface",
            index,
            self.width,
            self.height
        );
        GridCoord {
            x: index % self.width,
            y: index / self.width,
        }
    }

    /// Grid index of `coord`, the inverse of [`Surface::coordinate_of`].
    ///
    /// # Panics
    /// Panics if `coord` is outside the grid.
    pub fn index_of(&self, coord: GridCoord) -> usize {
        assert!(
            coord.x < self.width && coord.y < self.height,
            "grid coordinate ({}, {}) out of range for {}x{} surface",
            coord.x,
            coord.y,
            self.width,
            self.height
        );
        coord.y * self.width + coord.x
    }

    /// Image `(column, row)` that `index` is drawn to; row 0 is the north edge.
    pub fn raster_position(&self, index: usize) -> (usize, usize) {
        let coord = self.coordinate_of(index);
        (coord.x, self.height - 1 - coord.y)
    }

    /// Geographic position of a grid cell.
    ///
    /// Columns and rows span the bound edge to edge. A single column or row
    /// sits on the west or south edge.
    pub fn point_at(&self, coord: GridCoord) -> Point {
        let lng = self.bound.west + coord.x as f64 * step(self.bound.width_deg(), self.width);
        let lat = self.bound.south + coord.y as f64 * step(self.bound.height_deg(), self.height);
        Point::new(lat, lng)
    }

    /// Geographic position of the cell at `index`.
    pub fn point_of(&self, index: usize) -> Point {
        self.point_at(self.coordinate_of(index))
    }

    /// All sample points in grid-index order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.len()).map(move |i| self.point_of(i))
    }
}

fn step(span: f64, cells: usize) -> f64 {
    if cells > 1 {
        span / (cells - 1) as f64
    } else {
        0.0
    }
}
