//! View Routes

use alert_aggregator::{SeverityCount, SnapshotMeta, TimelinePoint, ViewSnapshot};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::display::{slice_color, DisplayDescription};
use crate::SharedState;

/// Query parameters for the ranking endpoint
#[derive(Debug, Deserialize)]
pub struct TopSourcesQuery {
    /// Return fewer entries than the configured ranking length
    pub limit: Option<usize>,
}

/// Everything the renderer needs in one response
#[derive(Debug, Serialize)]
pub struct ViewsResponse<'a> {
    #[serde(flatten)]
    pub snapshot: &'a ViewSnapshot,
    pub display: DisplayDescription,
}

/// Response for the timeline endpoint
#[derive(Debug, Serialize)]
pub struct TimelineResponse<'a> {
    pub data: &'a [TimelinePoint],
    pub meta: TimelineMeta,
}

#[derive(Debug, Serialize)]
pub struct TimelineMeta {
    pub count: usize,
    pub skipped_invalid: usize,
}

/// Response for the severity endpoint
#[derive(Debug, Serialize)]
pub struct SeverityResponse<'a> {
    pub data: &'a [SeverityCount],
    pub count: usize,
    pub total: usize,
}

/// Ranking entry with its slice color
#[derive(Debug, Serialize)]
pub struct SourceSlice<'a> {
    pub src_ip: &'a str,
    pub count: usize,
    pub color: &'static str,
}

/// Response for the top sources endpoint
#[derive(Debug, Serialize)]
pub struct TopSourcesResponse<'a> {
    pub data: Vec<SourceSlice<'a>>,
    pub count: usize,
    pub meta: &'a SnapshotMeta,
}

/// Get all views plus display settings
pub async fn get_all(State(state): State<SharedState>) -> Response {
    let (snapshot, display) = {
        let state = state.read().await;
        (state.cache.current(), state.display)
    };

    Json(ViewsResponse {
        snapshot: &snapshot,
        display: display.describe(),
    })
    .into_response()
}

/// Get the alerts-over-time series
pub async fn get_timeline(State(state): State<SharedState>) -> Response {
    let snapshot = state.read().await.cache.current();

    Json(TimelineResponse {
        data: &snapshot.views.timeline,
        meta: TimelineMeta {
            count: snapshot.views.timeline.len(),
            skipped_invalid: snapshot.meta.invalid_timestamp_count,
        },
    })
    .into_response()
}

/// Get alert counts by severity
pub async fn get_severity(State(state): State<SharedState>) -> Response {
    let snapshot = state.read().await.cache.current();
    let severity = &snapshot.views.severity;

    Json(SeverityResponse {
        data: severity,
        count: severity.len(),
        total: severity.iter().map(|s| s.count).sum(),
    })
    .into_response()
}

/// Get the source IP ranking
pub async fn get_top_sources(
    State(state): State<SharedState>,
    Query(params): Query<TopSourcesQuery>,
) -> Response {
    let snapshot = state.read().await.cache.current();
    let ranking = &snapshot.views.top_sources;
    let limit = params.limit.unwrap_or(ranking.len()).min(ranking.len());

    let data: Vec<SourceSlice<'_>> = ranking[..limit]
        .iter()
        .enumerate()
        .map(|(index, entry)| SourceSlice {
            src_ip: &entry.src_ip,
            count: entry.count,
            color: slice_color(index),
        })
        .collect();

    Json(TopSourcesResponse {
        count: data.len(),
        data,
        meta: &snapshot.meta,
    })
    .into_response()
}
