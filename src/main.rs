//! poolshare host process.
//!
//! # Architecture Overview
//!
//! ```text
//!   poolshare.toml
//!        │
//!        ▼
//!  ┌───────────┐    ┌────────────────────┐    ┌──────────────────┐
//!  │  config   │───▶│ LifecycleController│───▶│   PoolRegistry   │──▶ MySQL pools
//!  │ load/valid│    │  on_start/shutdown │    │ create/close_all │
//!  └───────────┘    └─────────┬──────────┘    └────────┬─────────┘
//!                             │ publish/take           │ lookup
//!                             ▼                        │
//!                      ┌──────────────┐                │
//!                      │ActiveRegistry│◀───────────────┘
//!                      └──────────────┘
//! ```
//!
//! Runs the startup pass, waits for SIGINT/SIGTERM, then runs the
//! shutdown pass.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use poolshare::config::loader::{ensure_config, load_config, specs_from_config};
use poolshare::config::{LoggingConfig, PoolSettings};
use poolshare::lifecycle::{signals, ActiveRegistry, LifecycleController};
use poolshare::observability::{init_logging, metrics, Sinks};
use poolshare::registry::MySqlConnector;

#[derive(Parser)]
#[command(name = "poolshare")]
#[command(about = "Named MySQL connection pool registry", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "poolshare.toml")]
    config: PathBuf,

    /// Load and validate the configuration, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let created = ensure_config(&cli.config);
    let loaded = load_config(&cli.config);

    let logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());
    init_logging(&logging);

    tracing::info!(config = %cli.config.display(), "poolshare v{} starting", env!("CARGO_PKG_VERSION"));

    match created {
        Ok(true) => tracing::info!("No configuration found, wrote defaults"),
        Ok(false) => {}
        Err(e) => tracing::error!(error = %e, "Failed to write default configuration"),
    }

    if cli.check {
        let config = loaded?;
        let (specs, skipped) = specs_from_config(&config);
        for e in &skipped {
            tracing::warn!(error = %e, "Database entry will be skipped");
        }
        tracing::info!(databases = specs.len(), skipped = skipped.len(), "Configuration is valid");
        return Ok(());
    }

    let settings = match &loaded {
        Ok(config) => {
            if config.metrics.enabled {
                match config.metrics.address.parse() {
                    Ok(addr) => metrics::init_metrics(addr),
                    Err(_) => tracing::error!(
                        metrics_address = %config.metrics.address,
                        "Failed to parse metrics address"
                    ),
                }
            }
            config.pool.clone()
        }
        Err(_) => PoolSettings::default(),
    };

    let controller = LifecycleController::new(
        Arc::new(MySqlConnector::new(settings)),
        Arc::new(ActiveRegistry::new()),
        Sinks::tracing(),
    );

    controller
        .on_start_from(loaded)
        .await?;

    signals::wait_for_shutdown().await;

    if let Some(report) = controller.on_shutdown().await {
        if !report.is_clean() {
            tracing::warn!(failed = report.failure_count(), "Some pools did not close cleanly");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
