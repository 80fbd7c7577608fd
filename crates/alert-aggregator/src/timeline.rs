//! Alerts-Over-Time Series

use alert_model::AlertRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One point of the line series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub timestamp: DateTime<Utc>,
    pub flow_id: u64,
}

/// Time-ordered points for every record with a usable timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    pub points: Vec<TimelinePoint>,
    /// Records left out because their timestamp did not parse
    pub skipped_invalid: usize,
}

/// Build the series; equal timestamps keep input order
pub fn timeline(records: &[AlertRecord]) -> Timeline {
    let mut points: Vec<TimelinePoint> = records
        .iter()
        .filter_map(|record| {
            record.timestamp.as_datetime().map(|timestamp| TimelinePoint {
                timestamp,
                flow_id: record.flow_id,
            })
        })
        .collect();
    points.sort_by_key(|point| point.timestamp);

    let skipped_invalid = records.len() - points.len();
    Timeline {
        points,
        skipped_invalid,
    }
}
