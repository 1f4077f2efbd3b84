#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::Context;
use bookstore_queries::SessionRunner;
use bookstore_queries::config::SessionConfig;
use bookstore_queries::report::ConsoleReport;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional first argument: path to a JSON config file
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config =
        SessionConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    log::info!("Using {}.{} at {}", config.database, config.collection, config.redacted_uri());

    let runner = SessionRunner::new(config).context("Failed to start async runtime")?;
    let summary = runner.run_all(&mut ConsoleReport::stdout());

    for failure in summary.failures() {
        log::warn!("{} did not complete", failure.group);
    }
    Ok(())
}
