//! Health check handlers
//!
//! The root banner plus liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use store_service::dto::{BannerResponse, HealthResponse, ReadinessResponse};
use store_service::HealthService;

use crate::state::AppState;

/// GET /
pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse::running())
}

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthService::new(state.service_context()).liveness())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let response = HealthService::new(state.service_context()).readiness().await;
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
