//! Alert Aggregation
//!
//! Derives the dashboard views from loaded alert records:
//! - Alerts over time (timestamp, flow id)
//! - Alert counts by severity
//! - Top source IPs by alert count
//!
//! All views are recomputed from scratch per load and cached until the next one.

mod histogram;
mod ranking;
mod snapshot;
mod timeline;

pub use histogram::{severity_histogram, SeverityCount, SeverityHistogram};
pub use ranking::{top_source_ips, top_values, SourceIpCount, TOP_SOURCES_DEFAULT};
pub use snapshot::{
    Aggregator, AggregatorConfig, DerivedViews, SnapshotMeta, ViewCache, ViewSnapshot,
};
pub use timeline::{timeline, Timeline, TimelinePoint};
