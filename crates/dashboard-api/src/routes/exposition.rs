//! Prometheus Exposition Route

use axum::extract::State;

use crate::error::ApiError;
use crate::SharedState;

/// Render metrics in the Prometheus text format
pub async fn render(State(state): State<SharedState>) -> Result<String, ApiError> {
    let state = state.read().await;
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or(ApiError::MetricsUnavailable)
}
