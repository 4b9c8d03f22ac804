//! Article content and summary operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Article;

/// Store uploaded content for an article.
///
/// A new id inserts a fresh row. An existing id with identical content is a
/// no-op, keeping any previously generated summary. Changed content replaces
/// the stored text and clears the summary so it is regenerated on the next
/// request.
pub async fn upsert_content(pool: &SqlitePool, id: &str, content: &str) -> Result<()> {
    let existing = sqlx::query_scalar::<_, String>("SELECT content FROM articles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match existing {
        None => {
            sqlx::query("INSERT INTO articles (id, content) VALUES (?, ?)")
                .bind(id)
                .bind(content)
                .execute(pool)
                .await?;
        }
        Some(stored) if stored != content => {
            sqlx::query("UPDATE articles SET content = ?, summary = NULL WHERE id = ?")
                .bind(content)
                .bind(id)
                .execute(pool)
                .await?;
        }
        Some(_) => {}
    }

    Ok(())
}

/// Get a full article row by id.
pub async fn get_article(pool: &SqlitePool, id: &str) -> Result<Article> {
    sqlx::query_as::<_, Article>(
        r#"
        SELECT id, content, summary, vectorized, recommendations, recommendations_updated_at
        FROM articles
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Article",
        id: id.to_string(),
    })
}

/// Get just the stored content for an article, if any.
pub async fn get_content(pool: &SqlitePool, id: &str) -> Result<Option<String>> {
    let content = sqlx::query_scalar::<_, String>("SELECT content FROM articles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(content)
}

/// Store the generated summary for an article.
pub async fn set_summary(pool: &SqlitePool, id: &str, summary: &str) -> Result<()> {
    let result = sqlx::query("UPDATE articles SET summary = ? WHERE id = ?")
        .bind(summary)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Article",
            id: id.to_string(),
        });
    }

    Ok(())
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
    async fn upsert_inserts_new_article() {
        let db = test_db().await;

        upsert_content(db.pool(), "post-1", "hello world").await.unwrap();

        let article = get_article(db.pool(), "post-1").await.unwrap();
        assert_eq!(article.content, "hello world");
        assert!(article.summary.is_none());
        assert!(!article.vectorized);
    }

    #[tokio::test]
    async fn identical_content_keeps_summary() {
        let db = test_db().await;

        upsert_content(db.pool(), "post-1", "hello world").await.unwrap();
        set_summary(db.pool(), "post-1", "a greeting").await.unwrap();

        upsert_content(db.pool(), "post-1", "hello world").await.unwrap();

        let article = get_article(db.pool(), "post-1").await.unwrap();
        assert_eq!(article.summary.as_deref(), Some("a greeting"));
    }

    #[tokio::test]
    async fn changed_content_resets_summary() {
        let db = test_db().await;

        upsert_content(db.pool(), "post-1", "first draft").await.unwrap();
        set_summary(db.pool(), "post-1", "about the draft").await.unwrap();

        upsert_content(db.pool(), "post-1", "second draft").await.unwrap();

        let article = get_article(db.pool(), "post-1").await.unwrap();
        assert_eq!(article.content, "second draft");
        assert!(article.summary.is_none());
    }

    #[tokio::test]
    async fn get_article_missing_id_is_not_found() {
        let db = test_db().await;

        let err = get_article(db.pool(), "absent").await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn get_content_returns_none_for_missing() {
        let db = test_db().await;

        assert_eq!(get_content(db.pool(), "absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_summary_on_missing_article_is_not_found() {
        let db = test_db().await;

        let err = set_summary(db.pool(), "absent", "text").await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
