//! Configuration
//!
//! Loaded in layers, later layers overriding earlier ones:
//! 1. Defaults (hardcoded)
//! 2. `dashboard.toml` in the working directory, or the file named by
//!    `--config` / `DASHBOARD_CONFIG` (required when given)
//! 3. Environment variables with the `DASHBOARD__` prefix
//!
//! Example environment variable override:
//! DASHBOARD__DATA__PATH=/var/lib/suricata/alerts.json
//! DASHBOARD__VIEWS__TOP_SOURCES=5

use alert_aggregator::{AggregatorConfig, TOP_SOURCES_DEFAULT};
use alert_model::{LoadOptions, MalformedPolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::display::Theme;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub views: AggregatorConfig,
    pub display: DisplayConfig,
    pub logging: LogConfig,
}

/// HTTP listener
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

/// Alert input file
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
    pub malformed_policy: MalformedPolicy,
}

impl DataConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            malformed_policy: self.malformed_policy,
        }
    }
}

/// Initial display preference (not persisted across restarts)
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub theme: Theme,
}

/// Operational logging
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl DashboardConfig {
    /// Load configuration from defaults, an optional file, and environment variables
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(file, environment())
    }

    fn load_with(
        file: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Server
            .set_default("server.bind_addr", "0.0.0.0:8080")?
            // Data
            .set_default("data.path", "data/alerts.json")?
            .set_default("data.malformed_policy", "skip")?
            // Views
            .set_default("views.top_sources", TOP_SOURCES_DEFAULT as i64)?
            // Display
            .set_default("display.theme", "dark")?
            // Logging
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?;

        let builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("dashboard").required(false)),
        };

        builder
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .separator("__")
        .try_parsing(true)
}
