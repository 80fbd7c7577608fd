//! View Snapshot and Cache

use crate::histogram::{severity_histogram, SeverityCount};
use crate::ranking::{top_source_ips, SourceIpCount, TOP_SOURCES_DEFAULT};
use crate::timeline::{timeline, TimelinePoint};
use alert_model::LoadedAlerts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Length of the source IP ranking (default: 10)
    pub top_sources: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            top_sources: TOP_SOURCES_DEFAULT,
        }
    }
}

/// The three derived views handed to the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedViews {
    pub timeline: Vec<TimelinePoint>,
    pub severity: Vec<SeverityCount>,
    pub top_sources: Vec<SourceIpCount>,
}

/// Facts about the load a snapshot was computed from
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMeta {
    pub load_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub record_count: usize,
    pub malformed_count: usize,
    pub invalid_timestamp_count: usize,
}

/// Views plus metadata from one load. Replaced wholesale, never edited.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub meta: SnapshotMeta,
    #[serde(flatten)]
    pub views: DerivedViews,
}

/// Computes snapshots from loaded alerts
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create a new aggregator
    pub fn new(config: AggregatorConfig) -> Self {
        info!("Creating aggregator with config: {:?}", config);
        Self { config }
    }

    /// Derive the three views
    fn derive(&self, loaded: &LoadedAlerts) -> (DerivedViews, usize) {
        let series = timeline(&loaded.records);
        let views = DerivedViews {
            timeline: series.points,
            severity: severity_histogram(&loaded.records).to_pairs(),
            top_sources: top_source_ips(&loaded.records, self.config.top_sources),
        };
        (views, series.skipped_invalid)
    }

    /// Compute a full snapshot for one load
    pub fn aggregate(&self, loaded: &LoadedAlerts) -> ViewSnapshot {
        let (views, invalid_timestamp_count) = self.derive(loaded);

        debug!(
            "Aggregated {} records: {} points, {} severities, {} sources",
            loaded.len(),
            views.timeline.len(),
            views.severity.len(),
            views.top_sources.len()
        );

        ViewSnapshot {
            meta: SnapshotMeta {
                load_id: Uuid::new_v4(),
                computed_at: Utc::now(),
                record_count: loaded.len(),
                malformed_count: loaded.malformed,
                invalid_timestamp_count,
            },
            views,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(AggregatorConfig::default())
    }
}

/// Holds the latest snapshot until the next load replaces it
pub struct ViewCache {
    current: Arc<ViewSnapshot>,
    /// Number of snapshots stored since creation
    generation: u64,
}

impl ViewCache {
    /// Create a cache holding `snapshot`
    pub fn new(snapshot: ViewSnapshot) -> Self {
        Self {
            current: Arc::new(snapshot),
            generation: 1,
        }
    }

    /// Current snapshot
    pub fn current(&self) -> Arc<ViewSnapshot> {
        Arc::clone(&self.current)
    }

    /// Swap in a new snapshot, returning the previous one
    pub fn replace(&mut self, snapshot: ViewSnapshot) -> Arc<ViewSnapshot> {
        self.generation += 1;
        info!(
            "Replacing view snapshot (generation {}, {} records)",
            self.generation, snapshot.meta.record_count
        );
        std::mem::replace(&mut self.current, Arc::new(snapshot))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::alert;
    use alert_model::Severity;

    fn loaded(records: Vec<alert_model::AlertRecord>) -> LoadedAlerts {
        LoadedAlerts::from_records(records)
    }

    #[test]
    fn test_aggregate_scenario() {
        let input = loaded(vec![alert(1, "a"), alert(1, "b"), alert(2, "a")]);
        let snapshot = Aggregator::default().aggregate(&input);

        assert_eq!(
            snapshot.views.severity,
            vec![
                SeverityCount { severity: Severity::Level(1), count: 2 },
                SeverityCount { severity: Severity::Level(2), count: 1 },
            ]
        );
        assert_eq!(
            snapshot.views.top_sources,
            vec![
                SourceIpCount { src_ip: "a".into(), count: 2 },
                SourceIpCount { src_ip: "b".into(), count: 1 },
            ]
        );
        assert_eq!(snapshot.views.timeline.len(), 3);
        assert_eq!(snapshot.meta.record_count, 3);
    }

    #[test]
    fn test_empty_input() {
        let snapshot = Aggregator::default().aggregate(&LoadedAlerts::default());
        assert_eq!(snapshot.views, DerivedViews::default());
        assert_eq!(snapshot.meta.record_count, 0);
    }

    #[test]
    fn test_idempotent() {
        let input = loaded(vec![alert(3, "x"), alert(1, "y"), alert(3, "x")]);
        let aggregator = Aggregator::default();

        let first = aggregator.aggregate(&input);
        let second = aggregator.aggregate(&input);
        assert_eq!(first.views, second.views);
        assert_ne!(first.meta.load_id, second.meta.load_id);
    }

    #[test]
    fn test_configured_top_sources() {
        let input = loaded(vec![alert(1, "a"), alert(1, "b"), alert(1, "c")]);
        let aggregator = Aggregator::new(AggregatorConfig { top_sources: 2 });
        assert_eq!(aggregator.aggregate(&input).views.top_sources.len(), 2);
    }

    #[test]
    fn test_meta_counts_malformed() {
        let mut input = loaded(vec![alert(1, "a")]);
        input.malformed = 4;
        assert_eq!(Aggregator::default().aggregate(&input).meta.malformed_count, 4);
    }

    #[test]
    fn test_cache_replace() {
        let aggregator = Aggregator::default();
        let mut cache = ViewCache::new(aggregator.aggregate(&LoadedAlerts::default()));
        let before = cache.current();

        let previous = cache.replace(aggregator.aggregate(&loaded(vec![alert(2, "a")])));
        assert_eq!(previous.meta.load_id, before.meta.load_id);
        assert_eq!(cache.current().meta.record_count, 1);
        assert_eq!(cache.generation(), 2);
        // Readers holding the old snapshot are unaffected
        assert_eq!(before.meta.record_count, 0);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = Aggregator::default().aggregate(&loaded(vec![alert(1, "a")]));
        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(json.get("meta").is_some());
        assert_eq!(json["severity"][0]["severity"], 1);
        assert_eq!(json["top_sources"][0]["src_ip"], "a");
        assert_eq!(json["timeline"][0]["flow_id"], 1);
    }
}
