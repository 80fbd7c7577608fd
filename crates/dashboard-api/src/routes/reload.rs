//! Reload Route

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::telemetry;
use crate::SharedState;

/// Response for the reload endpoint
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub load_id: Uuid,
    pub record_count: usize,
    pub malformed_count: usize,
    pub generation: u64,
}

/// Re-read the alert file and replace the cached snapshot.
///
/// The new snapshot is built without holding the state lock; a failed load
/// leaves the previous snapshot in place. Concurrent reloads run one at a time.
pub async fn reload(State(state): State<SharedState>) -> Result<Json<ReloadResponse>, ApiError> {
    let source = Arc::clone(&state.read().await.source);
    let _reloading = source.begin_reload().await;

    let loader = Arc::clone(&source);
    let loaded = tokio::task::spawn_blocking(move || loader.load())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let snapshot = match loaded {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!("Reload failed, keeping previous snapshot: {}", err);
            telemetry::record_reload(false);
            return Err(err.into());
        }
    };

    let mut state = state.write().await;
    state.cache.replace(snapshot);
    telemetry::record_reload(true);

    let current = state.cache.current();
    Ok(Json(ReloadResponse {
        load_id: current.meta.load_id,
        record_count: current.meta.record_count,
        malformed_count: current.meta.malformed_count,
        generation: state.cache.generation(),
    }))
}
