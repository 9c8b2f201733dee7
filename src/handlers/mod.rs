pub mod directory;
pub mod identity;
pub mod sessions;
pub mod settings;
pub mod templates;

use axum::{Json, extract::State, http::StatusCode, http::Uri};
use serde::Serialize;
use tracing::warn;

use crate::error::ApiErrorBody;
use crate::router::AdminState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: String,
}

/// GET /health
pub async fn health_check(State(state): State<AdminState>) -> Json<HealthResponse> {
    let database = match state.storage.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            warn!(error = %e, "health check could not reach the database");
            "unreachable".to_string()
        }
    };
    Json(HealthResponse {
        status: "ok",
        database,
    })
}

pub async fn handler404(uri: Uri) -> (StatusCode, Json<ApiErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorBody {
            error: format!("Invalid path: {}", uri.path()),
        }),
    )
}
