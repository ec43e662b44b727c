//! End-to-end tests against the full router, driven in-process with `oneshot`.
//!
//! Run with: cargo test --test api_tests
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use greeter::config::{AppConfig, FileConfig};
use greeter::{create_router, AppState};

const TEST_API_KEY: &str = "bijonguha";

fn test_config(pairs: &[(&str, &str)]) -> AppConfig {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::resolve(FileConfig::default(), move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config should resolve")
}

fn app() -> Router {
    create_router(AppState::new(test_config(&[("API_KEY", TEST_API_KEY)])))
}

/// Send a request and return status plus raw body bytes.
async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn hello_request(api_key: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/hello")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(body.into()).unwrap()
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("response body should be JSON")
}

#[tokio::test]
async fn test_healthcheck_ok_without_auth() {
    let request = Request::get("/healthcheck").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"status": "ok"}));
}

#[tokio::test]
async fn test_healthcheck_headers() {
    let request = Request::get("/healthcheck").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    let request_id = response.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_hello_with_valid_api_key() {
    let request = hello_request(Some(TEST_API_KEY), r#"{"name": "Beginner"}"#);
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"message": "Hello, Beginner!"}));
}

#[tokio::test]
async fn test_hello_with_invalid_api_key() {
    let request = hello_request(Some("wrong"), r#"{"name": "Test"}"#);
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(&body), json!({"detail": "Invalid API key"}));
}

#[tokio::test]
async fn test_hello_without_api_key() {
    let request = hello_request(None, r#"{"name": "Bijon"}"#);
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(&body), json!({"detail": "API key required"}));
}

#[tokio::test]
async fn test_hello_with_empty_api_key() {
    let request = hello_request(Some(""), r#"{"name": "Bijon"}"#);
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_hello_api_key_is_case_sensitive() {
    let request = hello_request(Some("BIJONGUHA"), r#"{"name": "Bijon"}"#);
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_checked_before_body() {
    for body in [r#"{"name": "Test"}"#, "{}", "not json", ""] {
        let request = hello_request(Some("wrong"), body);
        let (status, _) = send(app(), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "body: {:?}", body);
    }
}

#[tokio::test]
async fn test_hello_with_missing_name() {
    let request = hello_request(Some(TEST_API_KEY), "{}");
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(&body)["detail"].is_string());
}

#[tokio::test]
async fn test_hello_with_empty_name() {
    let request = hello_request(Some(TEST_API_KEY), r#"{"name": ""}"#);
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(&body), json!({"detail": "name must not be empty"}));
}

#[tokio::test]
async fn test_hello_with_malformed_json() {
    let request = hello_request(Some(TEST_API_KEY), r#"{"name": "#);
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_hello_with_wrong_name_type() {
    let request = hello_request(Some(TEST_API_KEY), r#"{"name": 42}"#);
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_hello_without_content_type() {
    let request = Request::post("/hello")
        .header("X-API-Key", TEST_API_KEY)
        .body(Body::from(r#"{"name": "Bijon"}"#))
        .unwrap();
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_hello_is_idempotent() {
    let app = app();
    let first = send(
        app.clone(),
        hello_request(Some(TEST_API_KEY), r#"{"name": "Ada"}"#),
    )
    .await;
    let second = send(app, hello_request(Some(TEST_API_KEY), r#"{"name": "Ada"}"#)).await;

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_hello_echoes_unicode_name() {
    let request = hello_request(Some(TEST_API_KEY), r#"{"name": "Zoë 🚀"}"#);
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["message"], "Hello, Zoë 🚀!");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let request = Request::get("/nope").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body), json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn test_info_reports_environment() {
    let state = AppState::new(test_config(&[
        ("ENVIRONMENT", "cloud-dev"),
        ("API_KEY", "secret"),
        ("AWS_REGION", "eu-central-1"),
    ]));
    let request = Request::get("/info").body(Body::empty()).unwrap();
    let (status, body) = send(create_router(state), request).await;

    assert_eq!(status, StatusCode::OK);
    let info = json_body(&body);
    assert_eq!(info["environment"], "CLOUD-DEV");
    assert_eq!(info["aws_region"], "eu-central-1");
    assert_eq!(info["title"], "Greeter - CLOUD-DEV");
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_configured_key_is_used() {
    let app = create_router(AppState::new(test_config(&[("API_KEY", "other-key")])));

    let (status, _) = send(
        app.clone(),
        hello_request(Some(TEST_API_KEY), r#"{"name": "Bijon"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(app, hello_request(Some("other-key"), r#"{"name": "Bijon"}"#)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_hello_oversized_body_is_413() {
    // Above axum's default 2 MB body limit
    let body = format!(r#"{{"name": "{}"}}"#, "a".repeat(3 * 1024 * 1024));
    let request = hello_request(Some(TEST_API_KEY), body);
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json_body(&body)["detail"].is_string());
}

#[tokio::test]
async fn test_hello_wrong_method_is_405_regardless_of_key() {
    for key in [None, Some("wrong"), Some(TEST_API_KEY)] {
        let mut builder = Request::get("/hello");
        if let Some(key) = key {
            builder = builder.header("X-API-Key", key);
        }
        let (status, _) = send(app(), builder.body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "key: {:?}", key);
    }
}

#[tokio::test]
async fn test_openapi_json_served() {
    let request = Request::get("/openapi.json").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    let doc = json_body(&body);
    assert!(doc["openapi"].is_string());
    assert_eq!(doc["info"]["title"], "Greeter");
    for path in ["/healthcheck", "/info", "/hello"] {
        assert!(doc["paths"][path].is_object(), "missing path {}", path);
    }
    assert_eq!(
        doc["components"]["securitySchemes"]["api_key"]["name"],
        "x-api-key"
    );
}

#[tokio::test]
async fn test_docs_page_served() {
    let request = Request::get("/docs").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}
