//! Progress reporting utilities

use crate::error::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Steps between progress bar refreshes
const TICK_INTERVAL: u64 = 4096;

/// Progress reporter for reconciliation runs
#[derive(Debug)]
pub struct ProgressReporter {
    pub rows_pb: Option<ProgressBar>,
    show_progress: bool,
    start_time: std::time::Instant,
}

impl ProgressReporter {
    /// Create progress reporter drawing a spinner on stderr
    pub fn new_for_diff() -> Result<Self> {
        let rows_pb = create_spinner("Reconciling rows...")?;

        Ok(Self {
            rows_pb: Some(rows_pb),
            show_progress: true,
            start_time: std::time::Instant::now(),
        })
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            rows_pb: None,
            show_progress: false,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.show_progress
    }

    /// Report the number of read steps processed so far
    pub fn update_rows(&self, processed: u64) {
        if processed % TICK_INTERVAL != 0 {
            return;
        }
        if let Some(pb) = &self.rows_pb {
            pb.set_position(processed);
            pb.set_message(format!("{} rows reconciled", processed));
        }
    }

    /// Finish row processing
    pub fn finish_rows(&mut self, processed: u64) {
        if let Some(pb) = self.rows_pb.take() {
            pb.finish_with_message(format!(
                "{} rows reconciled in {:.2?}",
                processed,
                self.start_time.elapsed()
            ));
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(pb) = self.rows_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar on stderr
fn create_spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .map_err(|e| anyhow::anyhow!("Invalid progress template: {}", e))?;
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
