// Pitcher deep dive entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config (defaults copied on first run, env override applied)
// 3. Build the HTTP summary source
// 4. Run the TUI event loop until the user quits

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use deepdive_tui::client::{HttpSummarySource, SummarySource};
use deepdive_tui::config;
use deepdive_tui::tui;
use directories::ProjectDirs;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Pitcher deep dive starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: api={}, {} seasons available, default {}",
        config.api.base_url,
        config.seasons.available.len(),
        config.seasons.default
    );

    // 3. Summary source
    let source: Arc<dyn SummarySource> = Arc::new(
        HttpSummarySource::new(&config.api.base_url)
            .context("failed to build summary client")?,
    );

    // 4. TUI (blocks until the user quits)
    if let Err(e) = tui::run(&config, source).await {
        error!("TUI error: {}", e);
        return Err(e);
    }

    info!("Pitcher deep dive shut down cleanly");
    Ok(())
}

/// Log directory under the platform data dir, or `./logs` when there is none.
fn log_dir() -> anyhow::Result<PathBuf> {
    match ProjectDirs::from("", "", "deepdive") {
        Some(dirs) => Ok(dirs.data_local_dir().join("logs")),
        None => Ok(std::env::current_dir()?.join("logs")),
    }
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("deepdive.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("deepdive=info,deepdive_tui=info,deepdive_core=info,warn")
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
