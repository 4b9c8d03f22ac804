//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Summary worker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// KV store SQLite URL (summary cache).
    pub kv_url: String,
    /// Relational store SQLite URL (articles, click counters).
    pub database_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SUMMARY_ADDR` | Server bind address | `127.0.0.1:8702` |
    /// | `SUMMARY_KV_PATH` | KV store SQLite URL | `sqlite:summary-worker.db?mode=rwc` |
    /// | `SUMMARY_DB_PATH` | Article store SQLite URL | `sqlite:articles.db?mode=rwc` |
    ///
    /// The inference API is configured separately; see
    /// `inference::InferenceConfig::from_env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SUMMARY_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8702".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let kv_url = env::var("SUMMARY_KV_PATH")
            .unwrap_or_else(|_| "sqlite:summary-worker.db?mode=rwc".to_string());

        let database_url = env::var("SUMMARY_DB_PATH")
            .unwrap_or_else(|_| "sqlite:articles.db?mode=rwc".to_string());

        Ok(Self {
            addr,
            kv_url,
            database_url,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SUMMARY_ADDR format")]
    InvalidAddr,
}
