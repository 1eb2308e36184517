//! Benchmark result data models
//!
//! Contains structures for storing and serializing run results, the derived
//! speedup/efficiency summary, and full benchmark reports.

use crate::config::BenchmarkConfig;
use crate::util::units::calculate_rate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Execution mode of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// One item at a time, in input order
    Sequential,
    /// Items spread over a worker pool
    Parallel,
}

impl RunMode {
    /// Short tag used in progress lines
    pub fn tag(&self) -> &'static str {
        match self {
            RunMode::Sequential => "SEQ",
            RunMode::Parallel => "PAR",
        }
    }
}

/// Outcome of one runner invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Mode the run executed in
    pub mode: RunMode,
    /// Number of files processed
    pub files_processed: usize,
    /// Wall-clock time from first dispatch to last completion
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,
    /// Worker count used, parallel runs only
    pub worker_count: Option<usize>,
}

impl RunResult {
    pub fn sequential(files_processed: usize, elapsed: Duration) -> Self {
        Self {
            mode: RunMode::Sequential,
            files_processed,
            elapsed,
            worker_count: None,
        }
    }

    pub fn parallel(files_processed: usize, elapsed: Duration, worker_count: usize) -> Self {
        Self {
            mode: RunMode::Parallel,
            files_processed,
            elapsed,
            worker_count: Some(worker_count),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Files per second, zero when no time elapsed
    pub fn files_per_second(&self) -> f64 {
        calculate_rate(self.files_processed, self.elapsed)
    }
}

/// Speedup and efficiency derived from a sequential/parallel pair
///
/// `None` marks a value that is not applicable, such as after a zero
/// parallel time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Summary {
    /// Sequential elapsed / parallel elapsed
    pub speedup: Option<f64>,
    /// Speedup / worker count
    pub efficiency: Option<f64>,
}

/// Complete benchmark report: both runs plus derived metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Timestamp when the benchmark finished
    pub timestamp: DateTime<Utc>,
    /// Configuration used for this benchmark
    pub config: BenchmarkConfig,
    /// Sequential baseline
    pub sequential: RunResult,
    /// Parallel run
    pub parallel: RunResult,
    /// Derived speedup and efficiency
    pub summary: Summary,
    /// System information at time of benchmark
    pub system_info: SystemInfo,
}

/// System information captured at benchmark time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system and architecture
    pub os: String,
    /// Logical CPUs visible to the process
    pub logical_cpus: usize,
    /// Physical CPU cores
    pub physical_cpus: usize,
}

impl BenchmarkReport {
    /// Create a new report with detected system info
    pub fn new(
        config: BenchmarkConfig,
        sequential: RunResult,
        parallel: RunResult,
        summary: Summary,
    ) -> Self {
        Self::with_system_info(config, sequential, parallel, summary, SystemInfo::detect())
    }

    /// Create a new report with custom system info
    pub fn with_system_info(
        config: BenchmarkConfig,
        sequential: RunResult,
        parallel: RunResult,
        summary: Summary,
        system_info: SystemInfo,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            config,
            sequential,
            parallel,
            summary,
            system_info,
        }
    }
}

impl SystemInfo {
    /// Create system info by detecting current system
    pub fn detect() -> Self {
        Self {
            os: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            logical_cpus: num_cpus::get(),
            physical_cpus: num_cpus::get_physical(),
        }
    }
}

// Durations are stored as integer nanoseconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_nanos() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}
