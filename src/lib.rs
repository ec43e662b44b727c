//! Greeter: a minimal greeting service guarded by a static API key.
//!
//! Exposes an unauthenticated health probe and service info, plus a greeting
//! endpoint that requires the `X-API-Key` header to match the configured key.
//! Configuration is read once at startup and shared immutably with handlers.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ConfigError, Environment, LogFormat};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
