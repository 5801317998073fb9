//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub platform: String,
    pub prediction_service: String,
}

/// Health check endpoint handler
///
/// Reports the configured service root; the service itself is not probed.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        platform: state.config.platform.to_string(),
        prediction_service: state.client.base_url().to_string(),
    })
}
