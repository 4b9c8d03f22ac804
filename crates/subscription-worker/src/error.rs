//! Error types for the subscription worker.
//!
//! This worker keeps the original API's response envelope: failures are
//! `{"success": false, "message": ...}` with the matching HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors that can occur in the subscription worker.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid session token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Request failed validation.
    #[error("{0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// KV store error.
    #[error("KV store error: {0}")]
    Kv(#[from] kv_store::KvError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Kv(err) => {
                tracing::error!("KV store error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "success": false,
            "message": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for subscription worker handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
