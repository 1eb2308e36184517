//! Utility functions module
//!
//! Contains helpers for formatting elapsed times, rates and derived
//! benchmark metrics.

pub mod units;

// Re-export commonly used functions
pub use units::{
    calculate_rate, format_duration, format_efficiency, format_rate, format_seconds,
    format_speedup,
};
