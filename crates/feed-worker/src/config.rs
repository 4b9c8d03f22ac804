//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Feed worker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// KV store SQLite URL.
    pub kv_url: String,
    /// Seconds between scheduled crawls.
    pub crawl_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `FEED_ADDR` | Server bind address | `127.0.0.1:8704` |
    /// | `FEED_KV_PATH` | KV store SQLite URL | `sqlite:feed-worker.db?mode=rwc` |
    /// | `FEED_CRAWL_INTERVAL_SECS` | Seconds between crawls | `3600` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("FEED_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8704".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let kv_url = env::var("FEED_KV_PATH")
            .unwrap_or_else(|_| "sqlite:feed-worker.db?mode=rwc".to_string());

        let crawl_interval_secs = env::var("FEED_CRAWL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        Ok(Self {
            addr,
            kv_url,
            crawl_interval_secs,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid FEED_ADDR format")]
    InvalidAddr,
}
