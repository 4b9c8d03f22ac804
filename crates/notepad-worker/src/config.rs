//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Notepad worker configuration.
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
    /// | `NOTEPAD_ADDR` | Server bind address | `127.0.0.1:8703` |
    /// | `NOTEPAD_KV_PATH` | KV store SQLite URL | `sqlite:notepad-worker.db?mode=rwc` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("NOTEPAD_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8703".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let kv_url = env::var("NOTEPAD_KV_PATH")
            .unwrap_or_else(|_| "sqlite:notepad-worker.db?mode=rwc".to_string());

        Ok(Self { addr, kv_url })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid NOTEPAD_ADDR format")]
    InvalidAddr,
}
