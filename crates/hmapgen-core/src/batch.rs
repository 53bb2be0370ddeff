//! Splits the grid into provider-sized requests and collects the heights.
//!
//! ## Chunk layout
//!
//! For `n` points and a limit of `P` points per request, the index range
//! `[0, n)` is cut into `ceil(n / P)` consecutive chunks. The first chunk
//! holds the `n mod P` remainder (when non-zero) and every following chunk
//! is exactly `P` points, so chunk boundaries line up with the end of the
//! sequence. Chunks are requested strictly one after another.
//!
//! Heights are written back at the grid index of the point they belong to,
//! so request order never affects the positional alignment of the result.

use crate::progress::{ChunkReport, ProgressObserver};
use crate::source::ElevationSource;
use crate::surface::Surface;
use crate::{HeightmapError, Result};
use std::ops::Range;
use std::time::Instant;
use tracing::debug;

/// Number of requests needed for `points` points at `limit` per request.
pub fn calls_required(points: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    points.div_ceil(limit)
}

/// Plan the index ranges sent to the source, remainder chunk first.
///
/// Returns an empty plan for `points == 0` or `limit == 0`.
pub fn plan_chunks(points: usize, limit: usize) -> Vec<Range<usize>> {
    if points == 0 || limit == 0 {
        return Vec::new();
    }

    let mut chunks = Vec::with_capacity(calls_required(points, limit));
    let remainder = points % limit;
    let mut start = 0;
    if remainder != 0 {
        chunks.push(0..remainder);
        start = remainder;
    }
    while start < points {
        chunks.push(start..start + limit);
        start += limit;
    }
    chunks
}

/// Fetch the height of every grid cell using the source's own limit.
pub fn sample<S, O>(surface: &Surface, source: &S, observer: &mut O) -> Result<Vec<f64>>
where
    S: ElevationSource + ?Sized,
    O: ProgressObserver + ?Sized,
{
    sample_with_limit(surface, source, source.max_points_per_request(), observer)
}

/// Fetch the height of every grid cell, sending at most `limit` points per
/// request.
///
/// `limit` must be between 1 and the source's
/// [`max_points_per_request`](ElevationSource::max_points_per_request).
/// The first failing chunk aborts the whole run.
pub fn sample_with_limit<S, O>(
    surface: &Surface,
    source: &S,
    limit: usize,
    observer: &mut O,
) -> Result<Vec<f64>>
where
    S: ElevationSource + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let max = source.max_points_per_request();
    if limit == 0 || limit > max {
        return Err(HeightmapError::InvalidBatchLimit { limit, max });
    }

    let total_points = surface.len();
    let chunks = plan_chunks(total_points, limit);
    let total_chunks = chunks.len();
    let mut heights = vec![0.0; total_points];
    let mut points_done = 0;

    for (chunk, range) in chunks.into_iter().enumerate() {
        let points: Vec<_> = range.clone().map(|i| surface.point_of(i)).collect();

        let started = Instant::now();
        let batch = source
            .elevations(&points)
            .map_err(|source| HeightmapError::Provider { chunk, source })?;
        let elapsed = started.elapsed();

        if batch.len() != points.len() {
            return Err(HeightmapError::HeightCountMismatch {
                chunk,
                expected: points.len(),
                actual: batch.len(),
            });
        }

        heights[range.clone()].copy_from_slice(&batch);
        points_done += points.len();

        debug!(
            source = source.name(),
            chunk,
            total_chunks,
            start = range.start,
            points = points.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "chunk complete"
        );

        observer.chunk_completed(&ChunkReport {
            chunk,
            total_chunks,
            points: points.len(),
            points_done,
            total_points,
            elapsed,
        });
    }

    Ok(heights)
}
