//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK whenever the process is running.
//! The load balancer polls it to decide whether a task should receive traffic.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: &'static str,
}

impl HealthStatus {
    pub const OK: HealthStatus = HealthStatus { status: "ok" };
}

/// Health check handler.
///
/// Only checks that the process can answer HTTP; no authentication.
#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "Service",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    )
)]
pub async fn healthcheck() -> Json<HealthStatus> {
    tracing::debug!("Health check requested");
    Json(HealthStatus::OK)
}
