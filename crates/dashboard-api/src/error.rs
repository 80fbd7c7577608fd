//! API Error Types

use alert_model::LoadError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("reload failed: {0}")]
    Reload(#[from] LoadError),

    #[error("metrics exporter not installed")]
    MetricsUnavailable,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Reload(LoadError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Reload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MetricsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
