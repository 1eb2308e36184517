//! Per-item progress updates and their console reporter

use std::time::Duration;

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::RunMode;
use crate::util::format_duration;

/// Progress update sent after each item completes
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Run the update belongs to
    pub mode: RunMode,
    /// Items completed so far, including this one
    pub completed: usize,
    /// Items in the run
    pub total: usize,
    /// File that just completed
    pub file_id: String,
    /// Elapsed time since the run started
    pub elapsed: Duration,
}

impl ProgressUpdate {
    /// Console line for this update
    pub fn line(&self) -> String {
        format!(
            "[{}] Processed {}/{} file(s)...",
            self.mode.tag(),
            self.completed,
            self.total
        )
    }
}

/// Spawn a task that prints progress updates for one run.
///
/// Returns the sender the runner reports into. The task ends once the
/// sender is dropped and all pending updates are printed.
pub fn spawn_progress_reporter(
    mode: RunMode,
    total: usize,
) -> (mpsc::Sender<ProgressUpdate>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<ProgressUpdate>(100);

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let handle = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            pb.set_position(update.completed as u64);
            pb.set_message(format!(
                "{} ({})",
                update.file_id,
                format_duration(update.elapsed)
            ));

            let line = match mode {
                RunMode::Sequential => update.line().yellow(),
                RunMode::Parallel => update.line().cyan(),
            };
            pb.suspend(|| println!("{}", line));
        }
        pb.finish_and_clear();
    });

    (tx, handle)
}
