//! Units formatting utilities
//!
//! Provides human-readable formatting of elapsed times, processing rates,
//! speedup and efficiency.

use std::time::Duration;

/// Format duration into a compact human-readable string
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use blurbench::util::units::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 3600 {
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if total_secs >= 60 {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{}m {}s", minutes, seconds)
    } else if total_secs > 0 {
        if millis > 0 {
            format!("{}.{:02}s", total_secs, millis / 10)
        } else {
            format!("{}s", total_secs)
        }
    } else {
        format!("{}ms", millis)
    }
}

/// Format elapsed wall-clock time as seconds with four decimals
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use blurbench::util::units::format_seconds;
///
/// assert_eq!(format_seconds(Duration::from_millis(1250)), "1.2500s");
/// ```
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.4}s", duration.as_secs_f64())
}

/// Calculate items processed per second
///
/// Returns 0.0 for a zero duration.
pub fn calculate_rate(items: usize, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }

    items as f64 / duration.as_secs_f64()
}

/// Format a processing rate in files per second
pub fn format_rate(files_per_second: f64) -> String {
    format!("{:.2} files/s", files_per_second)
}

/// Format a speedup factor, `n/a` when not applicable
///
/// # Examples
/// ```
/// use blurbench::util::units::format_speedup;
///
/// assert_eq!(format_speedup(Some(3.5)), "3.500x");
/// assert_eq!(format_speedup(None), "n/a");
/// ```
pub fn format_speedup(speedup: Option<f64>) -> String {
    match speedup {
        Some(value) => format!("{:.3}x", value),
        None => "n/a".to_string(),
    }
}

/// Format a parallel efficiency, `n/a` when not applicable
pub fn format_efficiency(efficiency: Option<f64>) -> String {
    match efficiency {
        Some(value) => format!("{:.3}", value),
        None => "n/a".to_string(),
    }
}
