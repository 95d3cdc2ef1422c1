use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable and read-only; validation itself keeps no shared state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (locale, app key, credential length bounds).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Secret used to sign and verify anti-forgery tokens.
    pub fn app_key(&self) -> &[u8] {
        self.config.app_key.as_bytes()
    }
}
