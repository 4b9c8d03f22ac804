//! Error types for inference operations.

use thiserror::Error;

/// Errors that can occur when talking to the inference API.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Configuration problem (missing API key, bad URL, client build failure).
    #[error("inference configuration error: {0}")]
    Configuration(String),

    /// Network-level failure sending the request.
    #[error("inference request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("inference API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API returned a success status but no usable payload.
    #[error("inference API returned an empty response")]
    EmptyResponse,
}
