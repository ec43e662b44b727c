//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via the Arc-wrapped config.
///
/// Holds the configuration resolved at startup. Nothing in here changes after
/// the router is built, so handlers never need a lock.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates a new application state from the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
