//! Alert Dashboard - Main Entry Point

use anyhow::Context;
use clap::Parser;
use dashboard_api::{run_server, telemetry, AppState, DashboardConfig, SnapshotSource};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "alert-dashboard", version, about = "Suricata alert dashboard API")]
struct Opts {
    /// Configuration file (defaults to ./dashboard.toml when present)
    #[arg(long, env = "DASHBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let config =
        DashboardConfig::load(opts.config.as_deref()).context("failed to load configuration")?;

    telemetry::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    info!("=== Alert Dashboard v{} ===", env!("CARGO_PKG_VERSION"));

    let metrics = telemetry::install_recorder().context("failed to install metrics recorder")?;

    let source = SnapshotSource::from_config(&config);
    let snapshot = source.load().with_context(|| {
        format!("failed to load alerts from {}", config.data.path.display())
    })?;
    info!(
        "Initial snapshot: {} records, {} malformed skipped",
        snapshot.meta.record_count, snapshot.meta.malformed_count
    );

    let state = AppState::new(source, snapshot, config.display.theme)
        .with_metrics(metrics)
        .into_shared();

    run_server(&config.server.bind_addr, state).await?;

    Ok(())
}
