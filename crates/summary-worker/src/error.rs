//! Error types for the summary worker.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors that can occur in the summary worker.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed validation.
    #[error("{0}")]
    Validation(String),

    /// KV store error.
    #[error("KV store error: {0}")]
    Kv(#[from] kv_store::KvError),

    /// Relational store error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// Inference API error.
    #[error("Text summarization failed")]
    Inference(#[from] inference::InferenceError),

    /// Fetching an external URL failed.
    #[error("Text extraction failed")]
    Extraction(#[from] reqwest::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Kv(err) => {
                tracing::error!("KV store error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            ApiError::Inference(err) => {
                tracing::error!("Inference error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::Extraction(err) => {
                tracing::error!("Extraction error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for summary worker handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
