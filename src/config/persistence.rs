//! Results persistence module
//!
//! Handles saving, loading, and rotation of benchmark reports.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::{BlurBenchError, Result, APP_NAME, RESULTS_FILE, MAX_RESULTS_HISTORY};
use crate::models::result::BenchmarkReport;

/// Benchmark report history storage
#[derive(Debug)]
pub struct ResultsStorage {
    results_path: PathBuf,
}

/// Results file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct ResultsFile {
    version: u32,
    reports: Vec<BenchmarkReport>,
}

impl ResultsStorage {
    /// Create a storage backed by the standard results file
    pub fn new() -> Result<Self> {
        let results_path = Self::results_file_path()?;
        Ok(Self { results_path })
    }

    /// Create a storage backed by a specific file
    pub fn with_path(results_path: impl Into<PathBuf>) -> Self {
        Self { results_path: results_path.into() }
    }

    /// Get the standard results file path
    /// Uses $DATA_HOME/blurbench/results.json
    pub fn results_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| BlurBenchError::PersistenceError(
                "Unable to determine data directory".to_string()
            ))?;

        Ok(data_dir.join(APP_NAME).join(RESULTS_FILE))
    }

    /// Load all reports from the results file
    pub fn load_reports(&self) -> Result<Vec<BenchmarkReport>> {
        if !self.results_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.results_path)
            .map_err(|e| BlurBenchError::PersistenceError(
                format!("Failed to read results file {}: {}", self.results_path.display(), e)
            ))?;

        let results_file: ResultsFile = serde_json::from_str(&content)
            .map_err(|e| BlurBenchError::PersistenceError(
                format!("Failed to parse results file {}: {}", self.results_path.display(), e)
            ))?;

        Ok(results_file.reports)
    }

    /// Append a report to the results file
    /// Drops the oldest reports beyond MAX_RESULTS_HISTORY entries
    pub fn append_report(&self, report: BenchmarkReport) -> Result<()> {
        let mut reports = self.load_reports()?;
        reports.push(report);

        if reports.len() > MAX_RESULTS_HISTORY {
            let skip_count = reports.len() - MAX_RESULTS_HISTORY;
            reports.drain(..skip_count);
        }

        self.save_reports(reports)
    }

    fn save_reports(&self, reports: Vec<BenchmarkReport>) -> Result<()> {
        if let Some(parent) = self.results_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BlurBenchError::PersistenceError(
                    format!("Failed to create results directory {}: {}", parent.display(), e)
                ))?;
        }

        let results_file = ResultsFile {
            version: 1,
            reports,
        };

        let content = serde_json::to_string_pretty(&results_file)?;

        fs::write(&self.results_path, content)
            .map_err(|e| BlurBenchError::PersistenceError(
                format!("Failed to write results file {}: {}", self.results_path.display(), e)
            ))?;

        Ok(())
    }

    pub fn results_path(&self) -> &Path {
        &self.results_path
    }
}
