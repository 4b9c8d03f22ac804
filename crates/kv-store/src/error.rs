//! Error types for the key-value store.

use thiserror::Error;

/// Errors that can occur during KV operations.
#[derive(Debug, Error)]
pub enum KvError {
    /// SQLx error (connection, query, etc.)
    #[error("kv store error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("kv migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored JSON value could not be (de)serialized
    #[error("kv value serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for KV operations.
pub type Result<T> = std::result::Result<T, KvError>;
