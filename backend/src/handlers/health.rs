//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub upstream_configured: bool,
    pub stations: usize,
    pub cached_responses: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream_configured: state.gateway.is_configured(),
        stations: state.stations.len(),
        cached_responses: state.gateway.cache().len().await,
    })
}
