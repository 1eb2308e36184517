//! Configuration management module
//!
//! Handles loading and validation of benchmark configuration.
//! The configuration is passed explicitly to the harness and the runners.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::{BlurBenchError, Result, APP_NAME, CONFIG_FILE, DEFAULT_BLUR_RADIUS};

pub mod persistence;

const MAX_BLUR_RADIUS: u32 = 1000;
const MAX_WORKERS: usize = 256;

/// Benchmark configuration structure containing all run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Folder holding the source images
    pub source_dir: PathBuf,
    /// Output folder for the sequential run
    pub sequential_output_dir: PathBuf,
    /// Output folder for the parallel run
    pub parallel_output_dir: PathBuf,
    /// Box blur radius in pixels
    pub blur_radius: u32,
    /// Parallel worker count, `None` uses every logical CPU
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_count: Option<usize>,
    /// Whether finished reports are appended to the results history
    pub keep_history: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("images"),
            sequential_output_dir: PathBuf::from("out_seq"),
            parallel_output_dir: PathBuf::from("out_par"),
            blur_radius: DEFAULT_BLUR_RADIUS,
            worker_count: None,
            keep_history: true,
        }
    }
}

impl BenchmarkConfig {
    /// Create a new benchmark configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(BlurBenchError::ConfigError(
                "Source folder must not be empty".to_string()
            ));
        }

        if self.sequential_output_dir.as_os_str().is_empty()
            || self.parallel_output_dir.as_os_str().is_empty()
        {
            return Err(BlurBenchError::ConfigError(
                "Output folders must not be empty".to_string()
            ));
        }

        // Output folders are wiped before each run
        if self.sequential_output_dir == self.parallel_output_dir {
            return Err(BlurBenchError::ConfigError(
                format!("Sequential and parallel output folders are both {}",
                    self.sequential_output_dir.display())
            ));
        }

        if self.sequential_output_dir == self.source_dir
            || self.parallel_output_dir == self.source_dir
        {
            return Err(BlurBenchError::ConfigError(
                format!("Output folder must differ from the source folder {}",
                    self.source_dir.display())
            ));
        }

        if self.blur_radius > MAX_BLUR_RADIUS {
            return Err(BlurBenchError::ConfigError(
                format!("Blur radius too large: {} (max: {})",
                    self.blur_radius, MAX_BLUR_RADIUS)
            ));
        }

        if let Some(count) = self.worker_count {
            if count == 0 {
                return Err(BlurBenchError::ConfigError(
                    "Worker count must be greater than 0".to_string()
                ));
            }

            if count > MAX_WORKERS {
                return Err(BlurBenchError::ConfigError(
                    format!("Too many workers: {} (max: {})", count, MAX_WORKERS)
                ));
            }
        }

        Ok(())
    }

    /// Worker count the parallel run will use
    pub fn resolved_worker_count(&self) -> usize {
        self.worker_count.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Set the source folder
    pub fn with_source_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_dir = path.into();
        self
    }

    /// Set both output folders
    pub fn with_output_dirs(mut self, sequential: impl Into<PathBuf>, parallel: impl Into<PathBuf>) -> Self {
        self.sequential_output_dir = sequential.into();
        self.parallel_output_dir = parallel.into();
        self
    }

    /// Set the blur radius
    pub fn with_blur_radius(mut self, radius: u32) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Override the parallel worker count
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = Some(count);
        self
    }

    /// Set whether reports are kept in the results history
    pub fn with_keep_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file
    /// Returns default configuration if file doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| BlurBenchError::ConfigError(
                format!("Failed to read config file {}: {}", config_path.display(), e)
            ))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| BlurBenchError::ConfigError(
                format!("Failed to parse config file {}: {}", config_path.display(), e)
            ))?;

        // Validate the loaded configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/blurbench/blurbench.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BlurBenchError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("images"));
        assert_eq!(config.sequential_output_dir, PathBuf::from("out_seq"));
        assert_eq!(config.parallel_output_dir, PathBuf::from("out_par"));
        assert_eq!(config.blur_radius, 50);
        assert_eq!(config.worker_count, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolved_worker_count() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.resolved_worker_count(), num_cpus::get());

        let config = config.with_worker_count(3);
        assert_eq!(config.resolved_worker_count(), 3);
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = BenchmarkConfig::default().with_worker_count(0);
        assert!(matches!(config.validate(), Err(BlurBenchError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_too_many_workers() {
        let config = BenchmarkConfig::default().with_worker_count(MAX_WORKERS + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_shared_output_folder() {
        let config = BenchmarkConfig::default().with_output_dirs("out", "out");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_output_over_source() {
        let config = BenchmarkConfig::default().with_output_dirs("images", "out_par");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_radius() {
        let config = BenchmarkConfig::default().with_blur_radius(MAX_BLUR_RADIUS + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = BenchmarkConfig::default()
            .with_source_dir("photos")
            .with_worker_count(4)
            .with_blur_radius(10);
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        let deserialized: BenchmarkConfig = toml::from_str(&toml_str).expect("Failed to deserialize from TOML");

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BenchmarkConfig = toml::from_str("worker_count = 2\n").unwrap();
        assert_eq!(config.worker_count, Some(2));
        assert_eq!(config.source_dir, PathBuf::from("images"));
        assert_eq!(config.blur_radius, 50);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = BenchmarkConfig::default().with_output_dirs("a", "b").with_keep_history(false);

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = BenchmarkConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().unwrap();
        let loaded = BenchmarkConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, BenchmarkConfig::default());
    }

    #[test]
    fn test_load_invalid_config_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "worker_count = 0\n").unwrap();

        assert!(matches!(BenchmarkConfig::load_from(&path), Err(BlurBenchError::ConfigError(_))));
    }

    #[test]
    fn test_config_file_path() {
        let path = BenchmarkConfig::config_file_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("blurbench"));
        assert!(path.to_string_lossy().contains("blurbench.toml"));
    }
}
