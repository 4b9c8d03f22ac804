//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Image worker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// KV store SQLite URL.
    pub kv_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `IMAGE_ADDR` | Server bind address | `127.0.0.1:8701` |
    /// | `IMAGE_KV_PATH` | KV store SQLite URL | `sqlite:image-worker.db?mode=rwc` |
    ///
    /// The inference API is configured separately; see
    /// `inference::InferenceConfig::from_env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("IMAGE_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8701".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let kv_url = env::var("IMAGE_KV_PATH")
            .unwrap_or_else(|_| "sqlite:image-worker.db?mode=rwc".to_string());

        Ok(Self { addr, kv_url })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid IMAGE_ADDR format")]
    InvalidAddr,
}
