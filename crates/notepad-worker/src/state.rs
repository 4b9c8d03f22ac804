//! Application state shared across handlers.

use kv_store::Namespace;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Note storage.
    pub notes: Namespace,
}

impl AppState {
    /// Create new application state.
    pub fn new(notes: Namespace) -> Self {
        Self { notes }
    }
}
