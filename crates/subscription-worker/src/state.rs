//! Application state shared across handlers.

use kv_store::Namespace;

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Subscription and settings storage.
    pub subs: Namespace,
    /// Worker configuration (credentials, token secret).
    pub config: Config,
}

impl AppState {
    /// Create new application state.
    pub fn new(subs: Namespace, config: Config) -> Self {
        Self { subs, config }
    }
}
