//! Service info endpoint: which environment and region this task belongs to.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub environment: &'static str,
    pub aws_region: String,
    pub title: String,
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/info",
    tag = "Service",
    responses(
        (status = 200, description = "Deployment environment and version", body = ServiceInfo)
    )
)]
pub async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    let config = &state.config;
    Json(ServiceInfo {
        environment: config.environment.as_str(),
        aws_region: config.aws_region.clone(),
        title: config.title(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
