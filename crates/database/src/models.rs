//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An uploaded article with its generated summary.
///
/// The `vectorized` flag and recommendation columns are written by external
/// blog tooling; this service only preserves them across content updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Article {
    /// Article id as chosen by the uploading blog (typically a path or slug).
    pub id: String,
    /// Raw uploaded content.
    pub content: String,
    /// Generated summary, if one has been produced for the current content.
    pub summary: Option<String>,
    /// Whether the article has been indexed for vector search.
    pub vectorized: bool,
    /// Cached recommendation payload, if any.
    pub recommendations: Option<String>,
    /// Timestamp token of the cached recommendations.
    pub recommendations_updated_at: Option<String>,
}
