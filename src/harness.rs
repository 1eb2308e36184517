//! Benchmark harness
//!
//! Enumerates the inputs once, runs the sequential baseline, then the
//! parallel run over the same files, and reports the derived summary.

use std::path::Path;

use crossterm::style::Stylize;
use tokio::task::JoinHandle;

use crate::bench::{
    render_run_line, render_summary, spawn_progress_reporter, summarize_runs, ParallelRunner,
    SequentialRunner,
};
use crate::config::BenchmarkConfig;
use crate::io::list_source_files;
use crate::models::{BenchmarkReport, RunMode};
use crate::{BlurBenchError, Result};

/// Find the files to process in `source_dir`.
///
/// Fails with `MissingSourceFolder` when the folder does not exist and with
/// `EmptySourceFolder` when it holds no regular files. Nothing is created
/// on disk in either case.
pub fn discover_inputs(source_dir: &Path) -> Result<Vec<String>> {
    if !source_dir.is_dir() {
        return Err(BlurBenchError::MissingSourceFolder(
            source_dir.display().to_string(),
        ));
    }

    let files = list_source_files(source_dir)?;
    if files.is_empty() {
        return Err(BlurBenchError::EmptySourceFolder(
            source_dir.display().to_string(),
        ));
    }

    Ok(files)
}

/// Wait for a progress reporter to drain.
///
/// The reporter exits once the runner has dropped its sender. A reporter
/// failure only loses console output, so it is logged and the run goes on.
async fn finish_reporter(reporter: JoinHandle<()>) {
    if let Err(e) = reporter.await {
        log::warn!("progress reporter stopped abnormally: {}", e);
    }
}

/// Run the full benchmark and print progress and the summary to stdout
pub async fn run_benchmark(config: &BenchmarkConfig) -> Result<BenchmarkReport> {
    config.validate()?;

    let files = discover_inputs(&config.source_dir)?;
    println!(
        "{}",
        format!(
            "Found {} file(s) in '{}'",
            files.len(),
            config.source_dir.display()
        )
        .green()
    );

    let sequential_runner = SequentialRunner::from_config(config)?;
    let parallel_runner = ParallelRunner::from_config(config)?;

    let (progress_tx, reporter) = spawn_progress_reporter(RunMode::Sequential, files.len());
    let sequential = sequential_runner.run(&files, progress_tx).await;
    finish_reporter(reporter).await;
    let sequential = sequential?;
    println!("{}", render_run_line(&sequential).yellow());

    let (progress_tx, reporter) = spawn_progress_reporter(RunMode::Parallel, files.len());
    println!(
        "{}",
        format!("Running parallel on {} worker(s)", parallel_runner.worker_count()).cyan()
    );
    let parallel = parallel_runner.run(&files, progress_tx).await;
    finish_reporter(reporter).await;
    let parallel = parallel?;
    println!("{}", render_run_line(&parallel).cyan());

    let summary = summarize_runs(&sequential, &parallel);
    let report = BenchmarkReport::new(config.clone(), sequential, parallel, summary);

    println!();
    println!("{}", render_summary(&report).magenta());

    Ok(report)
}
