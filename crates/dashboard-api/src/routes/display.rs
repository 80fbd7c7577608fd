//! Display Routes

use axum::{extract::State, Json};
use tracing::info;

use crate::display::DisplayDescription;
use crate::SharedState;

/// Get the current theme and its style
pub async fn get_display(State(state): State<SharedState>) -> Json<DisplayDescription> {
    let state = state.read().await;
    Json(state.display.describe())
}

/// Flip light/dark
pub async fn toggle_theme(State(state): State<SharedState>) -> Json<DisplayDescription> {
    let mut state = state.write().await;
    let theme = state.display.toggle();
    info!("Display theme switched to {}", theme.as_str());
    Json(state.display.describe())
}
