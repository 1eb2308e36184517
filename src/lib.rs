//! blurbench - Sequential vs parallel image blur benchmark
//!
//! Blurs every image in a source folder twice, once one file at a time and
//! once on a pool of worker threads, then reports speedup and efficiency.

use std::fmt;

// Public re-exports
pub mod bench;
pub mod config;
pub mod harness;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum BlurBenchError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Source folder does not exist
    MissingSourceFolder(String),
    /// Source folder exists but holds no eligible files
    EmptySourceFolder(String),
    /// Source file is not a readable image
    DecodeError(String),
    /// Output image could not be encoded or written
    WriteError(String),
    /// Folder reset or listing was denied
    FilesystemError(String),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Worker pool management error
    WorkerError(String),
    /// Results persistence error
    PersistenceError(String),
}

impl fmt::Display for BlurBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlurBenchError::IoError(err) => write!(f, "I/O error: {}", err),
            BlurBenchError::MissingSourceFolder(path) => write!(f, "Missing '{}' folder", path),
            BlurBenchError::EmptySourceFolder(path) => write!(f, "No files found in '{}'", path),
            BlurBenchError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            BlurBenchError::WriteError(msg) => write!(f, "Write error: {}", msg),
            BlurBenchError::FilesystemError(msg) => write!(f, "Filesystem error: {}", msg),
            BlurBenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BlurBenchError::WorkerError(msg) => write!(f, "Worker error: {}", msg),
            BlurBenchError::PersistenceError(msg) => write!(f, "Results persistence error: {}", msg),
        }
    }
}

impl std::error::Error for BlurBenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlurBenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BlurBenchError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                BlurBenchError::FilesystemError(format!("Access denied: {}", err))
            }
            _ => BlurBenchError::IoError(err),
        }
    }
}

impl From<serde_json::Error> for BlurBenchError {
    fn from(err: serde_json::Error) -> Self {
        BlurBenchError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for BlurBenchError {
    fn from(err: toml::de::Error) -> Self {
        BlurBenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

/// Result type alias for blurbench operations
pub type Result<T> = std::result::Result<T, BlurBenchError>;

/// Error handling utilities
pub mod error {
    use super::BlurBenchError;

    /// Whether the error ends the run before any work started.
    ///
    /// These are reported to the user but are not failures of the program.
    pub fn is_benign_abort(error: &BlurBenchError) -> bool {
        matches!(
            error,
            BlurBenchError::MissingSourceFolder(_) | BlurBenchError::EmptySourceFolder(_)
        )
    }

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &BlurBenchError) -> String {
        match error {
            BlurBenchError::MissingSourceFolder(path) => {
                format!("Missing '{}' folder. Create it and add some images.", path)
            }
            BlurBenchError::EmptySourceFolder(path) => {
                format!("No files found in '{}'. Add some images and retry.", path)
            }
            BlurBenchError::DecodeError(msg) => {
                format!("Could not read an input image ({}). Remove non-image files from the source folder.", msg)
            }
            BlurBenchError::WriteError(_) | BlurBenchError::FilesystemError(_) => {
                "Failed to write output images. Check disk space and folder permissions.".to_string()
            }
            BlurBenchError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            BlurBenchError::PersistenceError(_) => {
                "Failed to save results. Check disk space and permissions.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "blurbench";
pub const CONFIG_FILE: &str = "blurbench.toml";
pub const RESULTS_FILE: &str = "results.json";
pub const MAX_RESULTS_HISTORY: usize = 100;
pub const DEFAULT_BLUR_RADIUS: u32 = 50;
