//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid bind address: {0}")]
    Bind(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Parse `host:port` from the HTTP section of the configuration.
pub fn bind_addr(http: &HttpServerConfig) -> Result<SocketAddr, ServerError> {
    format!("{}:{}", http.host, http.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("{}:{} ({})", http.host, http.port, e)))
}

/// Start the HTTP server.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, http: &HttpServerConfig) -> Result<(), ServerError> {
    let addr = bind_addr(http)?;
    let handle = Handle::new();

    tracing::info!(%addr, "Starting HTTP server");

    shutdown::setup_shutdown_handler(handle.clone());

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
