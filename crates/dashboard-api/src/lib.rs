//! Alert Dashboard API Server
//!
//! Serves the derived alert views and the display preference to the
//! dashboard renderer.

use axum::{
    extract::State,
    http::Method,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use uuid::Uuid;

pub mod config;
pub mod display;
mod error;
mod routes;
mod source;
pub mod telemetry;

pub use config::DashboardConfig;
pub use display::{DisplaySettings, Theme};
pub use error::ApiError;
pub use source::SnapshotSource;

use alert_aggregator::{ViewCache, ViewSnapshot};

/// Application state shared across handlers
pub struct AppState {
    /// Latest computed views
    pub cache: ViewCache,
    /// Light/dark preference
    pub display: DisplaySettings,
    /// Where reloads read from
    pub source: Arc<SnapshotSource>,
    /// Prometheus exporter, if installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

pub type SharedState = Arc<RwLock<AppState>>;

impl AppState {
    /// Create new application state around an initial snapshot
    pub fn new(source: SnapshotSource, snapshot: ViewSnapshot, theme: Theme) -> Self {
        Self {
            cache: ViewCache::new(snapshot),
            display: DisplaySettings::new(theme),
            source: Arc::new(source),
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub snapshot: SnapshotHealth,
}

/// Summary of the cached snapshot
#[derive(Debug, Serialize)]
pub struct SnapshotHealth {
    pub load_id: Uuid,
    pub record_count: usize,
    pub malformed_count: usize,
    pub generation: u64,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/views", get(routes::views::get_all))
        .route("/api/v1/views/timeline", get(routes::views::get_timeline))
        .route("/api/v1/views/severity", get(routes::views::get_severity))
        .route("/api/v1/views/top-sources", get(routes::views::get_top_sources))
        .route("/api/v1/display", get(routes::display::get_display))
        .route("/api/v1/display/toggle", post(routes::display::toggle_theme))
        .route("/api/v1/reload", post(routes::reload::reload))
        .route("/metrics", get(routes::exposition::render))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let snapshot = state.cache.current();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        snapshot: SnapshotHealth {
            load_id: snapshot.meta.load_id,
            record_count: snapshot.meta.record_count,
            malformed_count: snapshot.meta.malformed_count,
            generation: state.cache.generation(),
        },
    })
}

/// Run the server until Ctrl-C
pub async fn run_server(addr: &str, state: SharedState) -> std::io::Result<()> {
    let app = create_router(state);

    info!("Starting dashboard API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            warn!("Cannot listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
