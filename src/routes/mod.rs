//! HTTP route handlers.
//!
//! Public routes (`/healthcheck`, `/info`, `/openapi.json`, `/docs`) need no
//! credentials. Protected routes (`/hello`) sit behind the API key guard. Every
//! response is marked `Cache-Control: no-store` and carries an `x-request-id`
//! header.

pub mod docs;
pub mod health;
pub mod hello;
pub mod info;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::error::ApiError;
use crate::middleware::{request_id_layer, require_api_key};
use crate::state::AppState;

/// Creates the Axum router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/healthcheck", get(health::healthcheck))
        .route("/info", get(info::info))
        .merge(docs::routes());

    // Guard wraps only the POST handler: a wrong method is 405 whatever the key
    let protected_routes = Router::new().route(
        "/hello",
        post(hello::hello).route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        )),
    );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
