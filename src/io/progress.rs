//! Row progress for offline matrix generation

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_LOG_INTERVAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::info;

/// Tracks finished matrix rows from any number of worker threads
///
/// Drives a terminal progress bar (hidden when quiet) and emits a log line
/// every few rows so unattended runs still report progress.
pub struct GenerationProgress {
    bar: ProgressBar,
    finished: AtomicUsize,
    total: usize,
    started: Instant,
}

fn row_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Rows: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} ({{eta}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

impl GenerationProgress {
    /// Create progress tracking for `total` rows
    pub fn new(total: usize, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        bar.set_style(row_style());

        Self {
            bar,
            finished: AtomicUsize::new(0),
            total,
            started: Instant::now(),
        }
    }

    /// Record one finished row
    pub fn row_done(&self) {
        let finished = self.finished.fetch_add(1, Ordering::Relaxed) + 1;
        self.bar.inc(1);

        if finished % PROGRESS_LOG_INTERVAL == 0 {
            let percent = finished * 100 / self.total.max(1);
            info!(
                finished,
                total = self.total,
                percent,
                elapsed_s = self.started.elapsed().as_secs(),
                "matrix rows processed"
            );
        }
    }

    /// Rows finished so far
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::Relaxed)
    }

    /// Close the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
        info!(
            rows = self.finished(),
            elapsed_s = self.started.elapsed().as_secs(),
            "matrix generation finished"
        );
    }
}
