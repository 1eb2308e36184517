//! Derived performance metrics and their console rendering

use crate::models::{BenchmarkReport, RunResult, Summary};
use crate::util::{format_rate, format_seconds, format_speedup, format_efficiency};

/// Compute speedup and efficiency from two elapsed times in seconds.
///
/// Never fails: a zero or non-finite parallel time leaves both values
/// undefined, and a zero worker count leaves efficiency undefined.
pub fn summarize(seq_elapsed: f64, par_elapsed: f64, worker_count: usize) -> Summary {
    let speedup = if par_elapsed > 0.0 && par_elapsed.is_finite() && seq_elapsed.is_finite() {
        Some(seq_elapsed / par_elapsed)
    } else {
        None
    };

    let efficiency = match speedup {
        Some(s) if worker_count > 0 => Some(s / worker_count as f64),
        _ => None,
    };

    Summary { speedup, efficiency }
}

/// Summarize a sequential/parallel pair of run results
pub fn summarize_runs(sequential: &RunResult, parallel: &RunResult) -> Summary {
    summarize(
        sequential.elapsed_secs(),
        parallel.elapsed_secs(),
        parallel.worker_count.unwrap_or(0),
    )
}

/// One-line result of a finished run
pub fn render_run_line(result: &RunResult) -> String {
    let mut line = format!(
        "[{}] Time: {} | Rate: {}",
        result.mode.tag(),
        format_seconds(result.elapsed),
        format_rate(result.files_per_second()),
    );

    if let Some(workers) = result.worker_count {
        line.push_str(&format!(" | Workers: {}", workers));
    }

    line
}

/// Final summary block for a finished benchmark
pub fn render_summary(report: &BenchmarkReport) -> String {
    let config = &report.config;

    [
        "--- Performance Summary ---".to_string(),
        format!("Sequential time   : {}", format_seconds(report.sequential.elapsed)),
        format!(
            "Parallel time     : {} ({} workers)",
            format_seconds(report.parallel.elapsed),
            report.parallel.worker_count.unwrap_or(0)
        ),
        format!("Speedup (T1/Tp)   : {}", format_speedup(report.summary.speedup)),
        format!("Efficiency (S/p)  : {}", format_efficiency(report.summary.efficiency)),
        format!(
            "Output folders    : {}/ , {}/",
            config.sequential_output_dir.display(),
            config.parallel_output_dir.display()
        ),
    ]
    .join("\n")
}
