//! Data models module
//!
//! Contains run results, the derived benchmark summary and the report
//! that is printed and persisted.

pub mod result;

// Re-export commonly used types
pub use result::{BenchmarkReport, RunMode, RunResult, Summary, SystemInfo};
