//! Elevation source abstraction.

use crate::geo::Point;

/// Error type returned by elevation sources.
///
/// The pipeline never inspects it; it is carried to the caller inside
/// [`crate::HeightmapError::Provider`].
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// A service that returns elevations for batches of points.
pub trait ElevationSource {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Maximum number of points accepted by a single call to
    /// [`ElevationSource::elevations`]. Must be greater than zero.
    fn max_points_per_request(&self) -> usize;

    /// Look up the elevation of each point, in meters.
    ///
    /// Returns one height per input point, in the same order.
    fn elevations(&self, points: &[Point]) -> Result<Vec<f64>, SourceError>;
}

impl<S: ElevationSource + ?Sized> ElevationSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn max_points_per_request(&self) -> usize {
        (**self).max_points_per_request()
    }

    fn elevations(&self, points: &[Point]) -> Result<Vec<f64>, SourceError> {
        (**self).elevations(points)
    }
}

impl<S: ElevationSource + ?Sized> ElevationSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn max_points_per_request(&self) -> usize {
        (**self).max_points_per_request()
    }

    fn elevations(&self, points: &[Point]) -> Result<Vec<f64>, SourceError> {
        (**self).elevations(points)
    }
}
