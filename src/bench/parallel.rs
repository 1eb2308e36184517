//! Parallel worker-pool runner
//!
//! Spreads one job per file over a dedicated rayon pool of OS threads and
//! streams completions back to the controlling task over a tokio channel.
//! The first failure raises a cancellation flag: jobs that have not started
//! yet skip their work, jobs already running finish, and the error is
//! returned once every job has reported back.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use rayon::ThreadPoolBuilder;
use tokio::sync::mpsc;
use crate::{BlurBenchError, Result};
use crate::bench::progress::ProgressUpdate;
use crate::config::BenchmarkConfig;
use crate::io::folder::reset_folder;
use crate::models::{RunMode, RunResult};
use crate::pipeline::{BoxBlur, ItemProcessor, WorkItem};

/// What a single job reports back to the controlling task
#[derive(Debug)]
enum ItemOutcome {
    Completed(String),
    Failed(BlurBenchError),
    Skipped,
}

/// Parallel benchmark executor
pub struct ParallelRunner {
    processor: ItemProcessor,
    output_dir: PathBuf,
    worker_count: usize,
}

impl ParallelRunner {
    /// Create a new parallel runner writing into `output_dir` with
    /// `worker_count` threads
    pub fn new(
        processor: ItemProcessor,
        output_dir: impl Into<PathBuf>,
        worker_count: usize,
    ) -> Result<Self> {
        if worker_count == 0 {
            return Err(BlurBenchError::ConfigError(
                "Worker count must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            processor,
            output_dir: output_dir.into(),
            worker_count,
        })
    }

    /// Create a runner for the configured source and parallel output folders.
    ///
    /// Without a configured worker count every logical CPU gets a worker.
    pub fn from_config(config: &BenchmarkConfig) -> Result<Self> {
        config.validate()?;

        let processor = ItemProcessor::new(&config.source_dir, BoxBlur::new(config.blur_radius));
        Self::new(processor, &config.parallel_output_dir, config.resolved_worker_count())
    }

    /// Number of worker threads the run will use
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Execute the parallel run.
    ///
    /// Progress updates arrive in completion order, which may differ from
    /// the order of `files`.
    pub async fn run(&self, files: &[String], progress_tx: mpsc::Sender<ProgressUpdate>) -> Result<RunResult> {
        reset_folder(&self.output_dir)?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.worker_count)
            .thread_name(|i| format!("blur-worker-{}", i))
            .build()
            .map_err(|e| BlurBenchError::WorkerError(format!("Failed to build worker pool: {}", e)))?;

        let total = files.len();
        log::info!(
            "parallel run: {} file(s) into {} on {} worker(s)",
            total,
            self.output_dir.display(),
            self.worker_count
        );

        let cancelled = Arc::new(AtomicBool::new(false));
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<ItemOutcome>();

        let start_time = Instant::now();

        for file_id in files {
            let item = WorkItem::new(file_id.clone(), self.output_dir.clone());
            let processor = self.processor.clone();
            let cancelled = Arc::clone(&cancelled);
            let outcome_tx = outcome_tx.clone();

            pool.spawn(move || {
                let outcome = if cancelled.load(Ordering::Acquire) {
                    ItemOutcome::Skipped
                } else {
                    match processor.process(&item) {
                        Ok(processed) => ItemOutcome::Completed(processed),
                        Err(e) => {
                            cancelled.store(true, Ordering::Release);
                            ItemOutcome::Failed(e)
                        }
                    }
                };
                let _ = outcome_tx.send(outcome);
            });
        }

        // The channel closes once every job has dropped its sender
        drop(outcome_tx);

        let mut completed = 0;
        let mut first_error: Option<BlurBenchError> = None;

        while let Some(outcome) = outcome_rx.recv().await {
            match outcome {
                ItemOutcome::Completed(file_id) => {
                    completed += 1;
                    log::debug!("parallel item done: {}", file_id);

                    let update = ProgressUpdate {
                        mode: RunMode::Parallel,
                        completed,
                        total,
                        file_id,
                        elapsed: start_time.elapsed(),
                    };
                    let _ = progress_tx.send(update).await;
                }
                ItemOutcome::Failed(e) => {
                    if first_error.is_none() {
                        log::warn!("parallel item failed, cancelling remaining work: {}", e);
                        first_error = Some(e);
                    } else {
                        log::debug!("additional parallel failure: {}", e);
                    }
                }
                ItemOutcome::Skipped => {}
            }
        }

        let elapsed = start_time.elapsed();

        if let Some(e) = first_error {
            return Err(e);
        }

        log::info!("parallel run finished in {}", crate::util::format_duration(elapsed));

        Ok(RunResult::parallel(total, elapsed, self.worker_count))
    }
}
