//! Per-chunk progress notifications.

use std::time::Duration;

/// Summary of one completed elevation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkReport {
    /// Zero-based chunk number in request order.
    pub chunk: usize,
    /// Total number of chunks for this run.
    pub total_chunks: usize,
    /// Points sent in this chunk.
    pub points: usize,
    /// Points completed so far, this chunk included.
    pub points_done: usize,
    /// Total number of points for this run.
    pub total_points: usize,
    /// Wall time spent waiting on the source for this chunk.
    pub elapsed: Duration,
}

impl ChunkReport {
    /// True for the last chunk of the run.
    pub fn is_last(&self) -> bool {
        self.chunk + 1 == self.total_chunks
    }
}

/// Receives a report after every successful chunk.
pub trait ProgressObserver {
    /// Called once per completed chunk, in request order.
    fn chunk_completed(&mut self, report: &ChunkReport);
}

impl<F: FnMut(&ChunkReport)> ProgressObserver for F {
    fn chunk_completed(&mut self, report: &ChunkReport) {
        self(report)
    }
}

/// Observer that ignores all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn chunk_completed(&mut self, _report: &ChunkReport) {}
}
