//! Greeting endpoint.
//!
//! The API key has already been checked by `require_api_key` when this handler
//! runs; it only validates the body and builds the greeting.

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorBody};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GreetingRequest {
    #[schema(example = "Beginner")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct GreetingResponse {
    #[schema(example = "Hello, Beginner!")]
    pub message: String,
}

/// Builds the greeting for `name`, echoed verbatim.
pub fn greeting(name: &str) -> String {
    format!("Hello, {}!", name)
}

/// Map an extractor rejection onto the error taxonomy.
///
/// Bodies over the size limit are 413; every other rejection (content type,
/// syntax, missing or mistyped `name`) is 422.
fn reject_body(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(rejection.body_text())
    } else {
        ApiError::Validation(rejection.body_text())
    }
}

/// `POST /hello`
#[utoipa::path(
    post,
    path = "/hello",
    tag = "Greeting",
    request_body = GreetingRequest,
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Greeting for the supplied name", body = GreetingResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorBody),
        (status = 413, description = "Request body too large", body = ErrorBody),
        (status = 422, description = "Malformed body or blank name", body = ErrorBody)
    )
)]
pub async fn hello(
    payload: Result<Json<GreetingRequest>, JsonRejection>,
) -> Result<Json<GreetingResponse>, ApiError> {
    let Json(request) = payload.map_err(reject_body)?;

    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }

    tracing::info!(name = %request.name, "Hello request");

    Ok(Json(GreetingResponse {
        message: greeting(&request.name),
    }))
}
