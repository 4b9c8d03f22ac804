//! Per-article click counters.
//!
//! Counters are keyed by a hash of the article id, mirroring the key format
//! the original blog clients already store.

use sqlx::SqlitePool;

use crate::error::Result;

/// Get the click count for a hashed article id. Missing counters read as 0.
pub async fn get_clicks(pool: &SqlitePool, url_hash: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT clicks FROM click_counts WHERE url_hash = ?")
        .bind(url_hash)
        .fetch_optional(pool)
        .await?;

    Ok(count.unwrap_or(0))
}

/// Increment the click count for a hashed article id, returning the new count.
pub async fn increment_clicks(pool: &SqlitePool, url_hash: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO click_counts (url_hash, clicks)
        VALUES (?, 1)
        ON CONFLICT (url_hash) DO UPDATE SET clicks = clicks + 1
        RETURNING clicks
        "#,
    )
    .bind(url_hash)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn missing_counter_reads_zero() {
        let db = test_db().await;

        assert_eq!(get_clicks(db.pool(), "deadbeef").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn increment_creates_then_counts_up() {
        let db = test_db().await;

        assert_eq!(increment_clicks(db.pool(), "deadbeef").await.unwrap(), 1);
        assert_eq!(increment_clicks(db.pool(), "deadbeef").await.unwrap(), 2);
        assert_eq!(increment_clicks(db.pool(), "deadbeef").await.unwrap(), 3);
        assert_eq!(get_clicks(db.pool(), "deadbeef").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn counters_are_independent() {
        let db = test_db().await;

        increment_clicks(db.pool(), "aaaa").await.unwrap();
        assert_eq!(get_clicks(db.pool(), "bbbb").await.unwrap(), 0);
    }
}
