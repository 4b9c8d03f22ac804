//! Application state shared across handlers.

use kv_store::Namespace;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Feed source configurations.
    pub sources: Namespace,
    /// Parsed-feed cache (per-source feeds and the aggregated snapshot).
    pub cache: Namespace,
    /// HTTP client for fetching feeds.
    pub http: reqwest::Client,
}

impl AppState {
    /// Create new application state.
    pub fn new(sources: Namespace, cache: Namespace) -> Self {
        Self {
            sources,
            cache,
            http: reqwest::Client::new(),
        }
    }
}
