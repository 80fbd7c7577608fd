//! Snapshot Source
//!
//! Reads the alert file and aggregates it into a fresh snapshot. Used once at
//! startup and again for every reload.

use alert_aggregator::{Aggregator, AggregatorConfig, ViewSnapshot};
use alert_model::{AlertLoader, LoadError, LoadOptions};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};

use crate::config::DashboardConfig;
use crate::telemetry;

pub struct SnapshotSource {
    path: PathBuf,
    loader: AlertLoader,
    aggregator: Aggregator,
    /// Held for the whole of a reload so snapshots are installed in read order
    reloading: Mutex<()>,
}

impl SnapshotSource {
    pub fn new(
        path: impl Into<PathBuf>,
        load_options: LoadOptions,
        aggregator_config: AggregatorConfig,
    ) -> Self {
        Self {
            path: path.into(),
            loader: AlertLoader::new(load_options),
            aggregator: Aggregator::new(aggregator_config),
            reloading: Mutex::new(()),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            config.data.path.clone(),
            config.data.load_options(),
            config.views.clone(),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for any reload in progress, then claim the next one
    pub async fn begin_reload(&self) -> MutexGuard<'_, ()> {
        self.reloading.lock().await
    }

    /// Read and aggregate the alert file. Blocking.
    pub fn load(&self) -> Result<ViewSnapshot, LoadError> {
        let loaded = self.loader.load_file(&self.path)?;
        telemetry::record_load(&loaded);
        Ok(self.aggregator.aggregate(&loaded))
    }
}
