//! Request middleware: request ID spans and the API key guard.
//!
//! `request_id_layer` generates a UUID v4 for each incoming request and creates a
//! tracing span that wraps the entire request lifecycle, so every log emitted while
//! handling the request carries the request_id field. `require_api_key` rejects
//! requests to protected routes before their body is read.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{API_KEY_HEADER, API_KEY_LOG_PREFIX_CHARS, REQUEST_ID_HEADER};
use crate::error::ApiError;
use crate::state::AppState;

/// Middleware that generates a request ID and creates a request span.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including other middleware and handlers.
/// The ID is echoed back in the `x-request-id` response header.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let path = uri.path();
    // Absent when the router is driven without a socket (tests)
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        client = %client,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

/// Middleware that requires `X-API-Key` to exactly match the configured key.
///
/// Runs before the handler extracts the body, so a bad key is reported as 401
/// whatever the body contains.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let supplied = match request.headers().get(API_KEY_HEADER) {
        Some(value) if !value.is_empty() => value,
        _ => {
            tracing::warn!("API key missing in request");
            return Err(ApiError::MissingApiKey);
        }
    };

    if supplied.as_bytes() != state.config.api_key.as_bytes() {
        tracing::warn!(
            key = %mask_key(&String::from_utf8_lossy(supplied.as_bytes())),
            "Invalid API key provided"
        );
        return Err(ApiError::InvalidApiKey);
    }

    tracing::debug!("API key verified");
    Ok(next.run(request).await)
}

/// Keep only the first few characters of a key for logging.
fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(API_KEY_LOG_PREFIX_CHARS).collect();
    format!("{}***", prefix)
}
