//! SQLite-backed key-value store with per-key expiration.
//!
//! The workers treat this crate the way the original services treated their
//! hosted KV bindings: each worker opens the store and takes one or more
//! [`Namespace`] handles, then reads and writes string (or JSON) values with
//! an optional TTL. Expired entries are invisible to reads and cleaned up
//! lazily via [`Namespace::purge_expired`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> kv_store::Result<()> {
//!     let store = kv_store::KvStore::connect("sqlite:nimbus-kv.db?mode=rwc").await?;
//!     store.migrate().await?;
//!
//!     let cache = store.namespace("image-cache");
//!     cache.put_with_ttl("key", "value", Duration::from_secs(3600)).await?;
//!     assert_eq!(cache.get("key").await?.as_deref(), Some("value"));
//!     Ok(())
//! }
//! ```

mod error;
mod namespace;

pub use error::{KvError, Result};
pub use namespace::{KvEntry, Namespace};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Key-value store connection wrapper.
#[derive(Debug, Clone)]
pub struct KvStore {
    pool: SqlitePool,
}

impl KvStore {
    /// Default pool size. The workers are low-traffic but handlers may hold
    /// a connection across an inference call, so leave some headroom.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect with a custom pool size.
    ///
    /// In-memory databases get one private database per connection, so tests
    /// against `sqlite::memory:` must use a pool size of 1.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to KV store: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run migrations. Call once after connecting.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get a handle scoped to one namespace.
    ///
    /// Namespaces are independent key spaces; the same key in two namespaces
    /// refers to two entries.
    pub fn namespace(&self, name: impl Into<String>) -> Namespace {
        Namespace::new(self.pool.clone(), name.into())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
