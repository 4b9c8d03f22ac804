//! Application state shared across handlers.

use inference::InferenceClient;
use kv_store::Namespace;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Generated-image cache.
    pub cache: Namespace,
    /// Inference API client.
    pub inference: InferenceClient,
}

impl AppState {
    /// Create new application state.
    pub fn new(cache: Namespace, inference: InferenceClient) -> Self {
        Self { cache, inference }
    }
}
