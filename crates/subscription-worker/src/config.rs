//! Configuration loaded from environment variables.
//!
//! Credentials and the token secret are injected from the environment and
//! never stored alongside the data they protect.

use std::env;
use std::net::SocketAddr;

/// Subscription worker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// KV store SQLite URL.
    pub kv_url: String,
    /// Admin login username.
    pub admin_username: String,
    /// Admin login password.
    pub admin_password: String,
    /// Secret used to sign session tokens.
    pub token_secret: String,
    /// Seconds between reminder checks.
    pub reminder_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SUBSCRIPTION_ADDR` | Server bind address | `127.0.0.1:8705` |
    /// | `SUBSCRIPTION_KV_PATH` | KV store SQLite URL | `sqlite:subscription-worker.db?mode=rwc` |
    /// | `SUBSCRIPTION_ADMIN_USERNAME` | Admin username | `admin` |
    /// | `SUBSCRIPTION_ADMIN_PASSWORD` | Admin password | (required) |
    /// | `SUBSCRIPTION_TOKEN_SECRET` | Token signing secret | (required) |
    /// | `SUBSCRIPTION_REMINDER_INTERVAL_SECS` | Seconds between reminder checks | `86400` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SUBSCRIPTION_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8705".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let kv_url = env::var("SUBSCRIPTION_KV_PATH")
            .unwrap_or_else(|_| "sqlite:subscription-worker.db?mode=rwc".to_string());

        let admin_username =
            env::var("SUBSCRIPTION_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());

        let admin_password = env::var("SUBSCRIPTION_ADMIN_PASSWORD")
            .map_err(|_| ConfigError::MissingAdminPassword)?;

        let token_secret = env::var("SUBSCRIPTION_TOKEN_SECRET")
            .map_err(|_| ConfigError::MissingTokenSecret)?;

        let reminder_interval_secs = env::var("SUBSCRIPTION_REMINDER_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        Ok(Self {
            addr,
            kv_url,
            admin_username,
            admin_password,
            token_secret,
            reminder_interval_secs,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SUBSCRIPTION_ADDR format")]
    InvalidAddr,

    #[error("SUBSCRIPTION_ADMIN_PASSWORD environment variable is required")]
    MissingAdminPassword,

    #[error("SUBSCRIPTION_TOKEN_SECRET environment variable is required")]
    MissingTokenSecret,
}
