//! Console progress bar for elevation requests.

use hmapgen_core::{ChunkReport, ProgressObserver};
use std::io::Write;
use std::time::{Duration, Instant};

const BAR_WIDTH: usize = 30;

/// Draws a single `\r`-updated progress line.
pub struct ConsoleProgress<W: Write> {
    out: W,
    started: Instant,
    total_latency: Duration,
}

impl ConsoleProgress<std::io::Stderr> {
    /// Progress bar on standard error.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> ConsoleProgress<W> {
    /// Progress bar written to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: Instant::now(),
            total_latency: Duration::ZERO,
        }
    }

    /// Consume the bar and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render the progress line for `report`.
pub fn render_line(report: &ChunkReport, total_latency: Duration, elapsed: Duration) -> String {
    let done = report.chunk + 1;
    let filled = if report.total_chunks == 0 {
        BAR_WIDTH
    } else {
        done * BAR_WIDTH / report.total_chunks
    };
    let avg_ms = total_latency.as_millis() as f64 / done as f64;
    format!(
        "  [{}{}] {:>5}/{:<5} calls | {:>7}/{:<7} points | last {:.2}s avg {:.0}ms | {:.1}s",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        done,
        report.total_chunks,
        report.points_done,
        report.total_points,
        report.elapsed.as_secs_f64(),
        avg_ms,
        elapsed.as_secs_f64()
    )
}

impl<W: Write> ProgressObserver for ConsoleProgress<W> {
    fn chunk_completed(&mut self, report: &ChunkReport) {
        self.total_latency += report.elapsed;
        let line = render_line(report, self.total_latency, self.started.elapsed());
        // Progress output is best effort
        let _ = write!(self.out, "\r{}", line);
        if report.is_last() {
            let _ = writeln!(self.out);
        }
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(chunk: usize, total_chunks: usize, points_done: usize) -> ChunkReport {
        ChunkReport {
            chunk,
            total_chunks,
            points: 50,
            points_done,
            total_points: 200,
            elapsed: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_render_line() {
        let line = render_line(
            &report(1, 4, 100),
            Duration::from_millis(600),
            Duration::from_secs(2),
        );
        assert!(line.contains(&format!("[{}{}]", "#".repeat(15), "-".repeat(15))));
        assert!(line.contains("2/4"));
        assert!(line.contains("100/200"));
        assert!(line.contains("last 0.25s avg 300ms"));
    }

    #[test]
    fn test_newline_after_last_chunk() {
        let mut progress = ConsoleProgress::new(Vec::new());
        for chunk in 0..4 {
            progress.chunk_completed(&report(chunk, 4, (chunk + 1) * 50));
        }
        let output = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(output.matches('\r').count(), 4);
        assert!(output.ends_with('\n'));
        assert!(output.contains(&"#".repeat(BAR_WIDTH)));
    }
}
