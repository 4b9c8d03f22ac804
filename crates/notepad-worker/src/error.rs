//! Error types for the notepad worker.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors that can occur in the notepad worker.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The note id contains characters outside `[A-Za-z0-9_-]`.
    #[error("Invalid note ID")]
    InvalidNoteId,

    /// KV store error.
    #[error("KV store error: {0}")]
    Kv(#[from] kv_store::KvError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidNoteId => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Kv(err) => {
                tracing::error!("KV store error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for notepad handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
