//! Namespace-scoped KV operations.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::Result;

/// An unexpired entry returned by [`Namespace::list`].
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct KvEntry {
    /// Key within the namespace.
    pub key: String,
    /// Stored value.
    pub value: String,
}

/// A handle scoped to one namespace of the store.
#[derive(Debug, Clone)]
pub struct Namespace {
    pool: SqlitePool,
    name: String,
}

impl Namespace {
    pub(crate) fn new(pool: SqlitePool, name: String) -> Self {
        Self { pool, name }
    }

    /// Namespace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a value. Returns `None` for missing or expired keys.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            r#"
            SELECT value FROM kv_entries
            WHERE namespace = ? AND key = ?
              AND (expires_at IS NULL OR expires_at > ?)
            "#,
        )
        .bind(&self.name)
        .bind(key)
        .bind(now_unix())
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    /// Store a value without expiration, replacing any existing entry.
    pub async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.write(key, value, None).await
    }

    /// Store a value that expires after `ttl`, replacing any existing entry.
    pub async fn put_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let expires_at = now_unix() + ttl.as_secs() as i64;
        self.write(key, value, Some(expires_at)).await
    }

    /// Delete a key. Deleting a missing key is not an error.
    pub async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_entries WHERE namespace = ? AND key = ?")
            .bind(&self.name)
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List unexpired entries whose key starts with `prefix`, ordered by key.
    pub async fn list(&self, prefix: &str) -> Result<Vec<KvEntry>> {
        let entries = sqlx::query_as::<_, KvEntry>(
            r#"
            SELECT key, value FROM kv_entries
            WHERE namespace = ? AND key LIKE ?
              AND (expires_at IS NULL OR expires_at > ?)
            ORDER BY key
            "#,
        )
        .bind(&self.name)
        .bind(format!("{prefix}%"))
        .bind(now_unix())
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Remove expired entries from this namespace. Returns the number removed.
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM kv_entries WHERE namespace = ? AND expires_at IS NOT NULL AND expires_at <= ?",
        )
        .bind(&self.name)
        .bind(now_unix())
        .execute(&self.pool)
        .await?;

        let removed = result.rows_affected();
        if removed > 0 {
            tracing::debug!(namespace = %self.name, removed, "Purged expired KV entries");
        }
        Ok(removed)
    }

    /// Get a JSON value, deserialized into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Store a value as JSON without expiration.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.put(key, &serde_json::to_string(value)?).await
    }

    /// Store a value as JSON that expires after `ttl`.
    pub async fn put_json_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        self.put_with_ttl(key, &serde_json::to_string(value)?, ttl)
            .await
    }

    async fn write(&self, key: &str, value: &str, expires_at: Option<i64>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_entries (namespace, key, value, expires_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (namespace, key) DO UPDATE SET
                value = excluded.value,
                expires_at = excluded.expires_at,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&self.name)
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KvStore;

    async fn test_store() -> KvStore {
        let store = KvStore::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let store = test_store().await;
        let ns = store.namespace("test");

        ns.put("greeting", "hello").await.unwrap();
        assert_eq!(ns.get("greeting").await.unwrap().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let store = test_store().await;
        let ns = store.namespace("test");

        assert_eq!(ns.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_existing_value() {
        let store = test_store().await;
        let ns = store.namespace("test");

        ns.put("key", "first").await.unwrap();
        ns.put("key", "second").await.unwrap();
        assert_eq!(ns.get("key").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn expired_entry_is_invisible() {
        let store = test_store().await;
        let ns = store.namespace("test");

        // Zero TTL expires immediately (expires_at == now is not > now).
        ns.put_with_ttl("flash", "gone", Duration::from_secs(0))
            .await
            .unwrap();
        assert_eq!(ns.get("flash").await.unwrap(), None);
        assert!(ns.list("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unexpired_ttl_entry_is_visible() {
        let store = test_store().await;
        let ns = store.namespace("test");

        ns.put_with_ttl("cached", "data", Duration::from_secs(3600))
            .await
            .unwrap();
        assert_eq!(ns.get("cached").await.unwrap().as_deref(), Some("data"));
    }

    #[tokio::test]
    async fn put_without_ttl_clears_previous_expiry() {
        let store = test_store().await;
        let ns = store.namespace("test");

        ns.put_with_ttl("key", "v1", Duration::from_secs(0))
            .await
            .unwrap();
        ns.put("key", "v2").await.unwrap();
        assert_eq!(ns.get("key").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let store = test_store().await;
        let ns = store.namespace("test");

        ns.put("key", "value").await.unwrap();
        ns.delete("key").await.unwrap();
        assert_eq!(ns.get("key").await.unwrap(), None);

        // Deleting again is a no-op.
        ns.delete("key").await.unwrap();
    }

    #[tokio::test]
    async fn list_filters_by_prefix_and_orders_by_key() {
        let store = test_store().await;
        let ns = store.namespace("test");

        ns.put("source:b", "2").await.unwrap();
        ns.put("source:a", "1").await.unwrap();
        ns.put("feed:a", "x").await.unwrap();

        let entries = ns.list("source:").await.unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["source:a", "source:b"]);
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let store = test_store().await;
        let notes = store.namespace("notes");
        let cache = store.namespace("cache");

        notes.put("key", "note value").await.unwrap();
        cache.put("key", "cache value").await.unwrap();

        assert_eq!(notes.get("key").await.unwrap().as_deref(), Some("note value"));
        assert_eq!(cache.get("key").await.unwrap().as_deref(), Some("cache value"));

        notes.delete("key").await.unwrap();
        assert_eq!(cache.get("key").await.unwrap().as_deref(), Some("cache value"));
    }

    #[tokio::test]
    async fn purge_expired_removes_only_expired_rows() {
        let store = test_store().await;
        let ns = store.namespace("test");

        ns.put_with_ttl("old", "x", Duration::from_secs(0))
            .await
            .unwrap();
        ns.put_with_ttl("fresh", "y", Duration::from_secs(3600))
            .await
            .unwrap();
        ns.put("forever", "z").await.unwrap();

        let removed = ns.purge_expired().await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(ns.get("fresh").await.unwrap().as_deref(), Some("y"));
        assert_eq!(ns.get("forever").await.unwrap().as_deref(), Some("z"));
    }

    #[tokio::test]
    async fn json_roundtrip() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Config {
            name: String,
            active: bool,
        }

        let store = test_store().await;
        let ns = store.namespace("test");

        let config = Config {
            name: "feed".to_string(),
            active: true,
        };
        ns.put_json("config", &config).await.unwrap();

        let loaded: Config = ns.get_json("config").await.unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn get_json_on_missing_key_returns_none() {
        let store = test_store().await;
        let ns = store.namespace("test");

        let loaded: Option<serde_json::Value> = ns.get_json("absent").await.unwrap();
        assert_eq!(loaded, None);
    }
}
