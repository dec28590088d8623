use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    /// `configured` or `disabled`
    pub llm: String,
    /// Content generator behind the lesson flow
    pub lesson_flow: String,
}

/// Liveness probe
pub async fn home() -> &'static str {
    "Hello, World!"
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let llm = if state.llm_client.is_some() { "configured" } else { "disabled" };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceStatus {
            llm: llm.to_string(),
            lesson_flow: state.config.flow.generator.as_str().to_string(),
        },
    })
}
