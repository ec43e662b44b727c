//! OpenAPI document and interactive API reference.
//!
//! `GET /openapi.json` serves the generated document; `GET /docs` serves a
//! Scalar page rendering it. Both are public.

use axum::{Json, Router};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use crate::config::API_KEY_HEADER;
use crate::error::ErrorBody;
use crate::state::AppState;

use super::{health, hello, info};

/// Path of the interactive reference page
pub const DOCS_PATH: &str = "/docs";

/// Name of the security scheme protected operations refer to
const API_KEY_SCHEME: &str = "api_key";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Greeter",
        description = "Greeting service guarded by a static API key"
    ),
    paths(health::healthcheck, info::info, hello::hello),
    components(schemas(
        health::HealthStatus,
        info::ServiceInfo,
        hello::GreetingRequest,
        hello::GreetingResponse,
        ErrorBody
    )),
    modifiers(&ApiKeyScheme),
    tags(
        (name = "Greeting", description = "Authenticated greeting"),
        (name = "Service", description = "Health probe and service metadata")
    )
)]
pub struct ApiDoc;

/// Registers the `X-API-Key` header scheme.
struct ApiKeyScheme;

impl Modify for ApiKeyScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            API_KEY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}

/// `GET /openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Routes for the document and the reference page.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/openapi.json", axum::routing::get(openapi_json))
        .merge(Scalar::with_url(DOCS_PATH, ApiDoc::openapi()))
}
