//! HTTP server module.
//!
//! Serves plain HTTP on the configured address; TLS terminates at the load
//! balancer in front of the task. Shuts down gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
