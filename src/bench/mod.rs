//! Benchmark engine module
//!
//! Contains the sequential and parallel runners, per-item progress
//! reporting, and the derived performance summary.

pub mod parallel;
pub mod progress;
pub mod report;
pub mod sequential;

#[cfg(test)]
mod integration_tests;

// Re-export commonly used types
pub use parallel::ParallelRunner;
pub use progress::{spawn_progress_reporter, ProgressUpdate};
pub use report::{render_run_line, render_summary, summarize, summarize_runs};
pub use sequential::SequentialRunner;
