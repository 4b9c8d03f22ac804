//! Application state shared across handlers.

use database::Database;
use inference::InferenceClient;
use kv_store::Namespace;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Summary cache.
    pub cache: Namespace,
    /// Article store.
    pub db: Database,
    /// Inference API client.
    pub inference: InferenceClient,
    /// HTTP client for fetching external pages.
    pub http: reqwest::Client,
}

impl AppState {
    /// Create new application state.
    pub fn new(cache: Namespace, db: Database, inference: InferenceClient) -> Self {
        Self {
            cache,
            db,
            inference,
            http: reqwest::Client::new(),
        }
    }
}
