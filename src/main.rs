//! HemoScan: CBC anemia classification and risk scoring.
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hemoscan::adapters::sanitize::SanitizingMakeWriter;
use hemoscan::config::AppConfig;
use hemoscan::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Logs written to the terminal corrupt the TUI (alternate screen), so an
    // interactive session logs to a file unless told otherwise.
    let use_file = config.log_mode.use_file(std::io::stdout().is_terminal());

    let (writer, _guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(!use_file)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    tracing::info!("Starting HemoScan...");
    if !config.narrative_enabled() {
        tracing::info!("No narrative API key configured; AI insights disabled");
    }

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("HemoScan shutdown complete.");
    Ok(())
}
