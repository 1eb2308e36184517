//! Sequential baseline runner
//!
//! Processes files strictly one at a time in input order, emitting a
//! progress update after each completes.

use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;
use crate::{BlurBenchError, Result};
use crate::bench::progress::ProgressUpdate;
use crate::config::BenchmarkConfig;
use crate::io::folder::reset_folder;
use crate::models::{RunMode, RunResult};
use crate::pipeline::{BoxBlur, ItemProcessor, WorkItem};

/// Sequential benchmark executor
pub struct SequentialRunner {
    processor: ItemProcessor,
    output_dir: PathBuf,
}

impl SequentialRunner {
    /// Create a new sequential runner writing into `output_dir`
    pub fn new(processor: ItemProcessor, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            processor,
            output_dir: output_dir.into(),
        }
    }

    /// Create a runner for the configured source and sequential output folders
    pub fn from_config(config: &BenchmarkConfig) -> Result<Self> {
        config.validate()?;

        let processor = ItemProcessor::new(&config.source_dir, BoxBlur::new(config.blur_radius));
        Ok(Self::new(processor, &config.sequential_output_dir))
    }

    /// Execute the sequential run.
    ///
    /// The output folder is reset first. Each item is handed to the blocking
    /// pool and awaited before the next one is dispatched, so only one item
    /// is ever in flight. The first failure aborts the rest of the run.
    pub async fn run(&self, files: &[String], progress_tx: mpsc::Sender<ProgressUpdate>) -> Result<RunResult> {
        reset_folder(&self.output_dir)?;

        let total = files.len();
        log::info!("sequential run: {} file(s) into {}", total, self.output_dir.display());

        let start_time = Instant::now();

        for (index, file_id) in files.iter().enumerate() {
            let item = WorkItem::new(file_id.clone(), self.output_dir.clone());
            let processor = self.processor.clone();

            let processed = tokio::task::spawn_blocking(move || processor.process(&item))
                .await
                .map_err(|e| BlurBenchError::WorkerError(format!("Sequential task failed: {}", e)))??;

            let update = ProgressUpdate {
                mode: RunMode::Sequential,
                completed: index + 1,
                total,
                file_id: processed,
                elapsed: start_time.elapsed(),
            };

            // A dropped receiver only means nobody is watching progress
            let _ = progress_tx.send(update).await;
        }

        let elapsed = start_time.elapsed();
        log::info!("sequential run finished in {}", crate::util::format_duration(elapsed));

        Ok(RunResult::sequential(total, elapsed))
    }
}
