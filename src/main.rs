use blurbench::config::persistence::ResultsStorage;
use blurbench::config::BenchmarkConfig;
use blurbench::error::{is_benign_abort, user_friendly_message};
use blurbench::harness::run_benchmark;
use crossterm::style::Stylize;
use env_logger::Env;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let outcome = match BenchmarkConfig::load() {
        Ok(config) => run_benchmark(&config).await.map(|report| (config, report)),
        Err(e) => Err(e),
    };

    let (config, report) = match outcome {
        Ok(pair) => pair,
        Err(e) if is_benign_abort(&e) => {
            println!("{}", user_friendly_message(&e).yellow());
            return;
        }
        Err(e) => {
            eprintln!("{}", format!("Error: {}", user_friendly_message(&e)).red());
            log::error!("benchmark failed: {}", e);
            std::process::exit(1);
        }
    };

    if !config.keep_history {
        return;
    }

    let saved = ResultsStorage::new().and_then(|storage| {
        storage.append_report(report)?;
        Ok(storage)
    });
    match saved {
        Ok(storage) => log::info!("report saved to {}", storage.results_path().display()),
        Err(e) => log::warn!("could not save benchmark report: {}", e),
    }
}
