//! Logging and Prometheus metrics

use alert_model::LoadedAlerts;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Initialize logging. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

/// Install the global Prometheus recorder. Only one may exist per process.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_gauge!("dashboard_records_loaded", "Records in the current snapshot");
    describe_counter!(
        "dashboard_records_malformed_total",
        "Alert entries skipped as malformed"
    );
    describe_counter!("dashboard_reloads_total", "Reload attempts");
    describe_counter!("dashboard_reload_failures_total", "Reloads that kept the previous snapshot");

    Ok(handle)
}

pub(crate) fn record_load(loaded: &LoadedAlerts) {
    gauge!("dashboard_records_loaded").set(loaded.len() as f64);
    counter!("dashboard_records_malformed_total").increment(loaded.malformed as u64);
}

pub(crate) fn record_reload(success: bool) {
    counter!("dashboard_reloads_total").increment(1);
    if !success {
        counter!("dashboard_reload_failures_total").increment(1);
    }
}
