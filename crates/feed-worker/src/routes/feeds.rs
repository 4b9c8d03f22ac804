//! Aggregated feed retrieval routes.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crawler::{self, FeedItem};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Pagination and filter parameters.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_limit() -> usize {
    50
}

/// A page of aggregated items.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Source metadata returned with a per-source page.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSourceInfo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// A page of one source's items.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFeedPage {
    pub source: FeedSourceInfo,
    pub items: Vec<FeedItem>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Merge, filter, sort and paginate items from all cached feeds.
pub fn page_items(
    feeds: Vec<crawler::CachedFeed>,
    query: &FeedQuery,
) -> (Vec<FeedItem>, usize) {
    let mut items = crawler::aggregate(feeds);

    if let Some(source) = &query.source {
        items.retain(|item| &item.source_id == source);
    }
    if let Some(category) = &query.category {
        items.retain(|item| &item.source_category == category);
    }

    let total = items.len();
    let page = items
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .collect();

    (page, total)
}

/// `GET /api/feeds` — the aggregated item stream.
pub async fn aggregated_feeds(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedPage>> {
    let feeds = crawler::load_cached_feeds(&state).await?;

    if feeds.is_empty() {
        return Ok(Json(FeedPage {
            items: Vec::new(),
            total: 0,
            limit: query.limit,
            offset: query.offset,
            has_more: false,
            message: Some("No data available. Please wait for the crawler to run.".to_string()),
        }));
    }

    let (items, total) = page_items(feeds, &query);
    let has_more = query.offset + query.limit < total;

    Ok(Json(FeedPage {
        items,
        total,
        limit: query.limit,
        offset: query.offset,
        has_more,
        message: None,
    }))
}

/// `GET /api/feeds/:source_id` — one source's cached feed.
pub async fn feed_by_source(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<SourceFeedPage>> {
    let feed: crawler::CachedFeed = state
        .cache
        .get_json(&format!("feed:{source_id}"))
        .await?
        .ok_or_else(|| ApiError::NotFound("Feed not found or not cached yet".to_string()))?;

    let total = feed.items.len();
    let items: Vec<FeedItem> = feed
        .items
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .collect();
    let has_more = query.offset + query.limit < total;

    Ok(Json(SourceFeedPage {
        source: FeedSourceInfo {
            id: source_id,
            title: feed.title,
            description: feed.description,
            link: feed.link,
            fetched_at: feed.fetched_at,
        },
        items,
        total,
        limit: query.limit,
        offset: query.offset,
        has_more,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::CachedFeed;
    use chrono::TimeZone;

    fn item(id: &str, source_id: &str, category: &str, day: u32) -> FeedItem {
        FeedItem {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            link: format!("https://example.com/{id}"),
            author: None,
            category: None,
            published_at: Some(Utc.with_ymd_and_hms(2026, 8, day, 0, 0, 0).unwrap()),
            source_id: source_id.to_string(),
            source_name: source_id.to_string(),
            source_category: category.to_string(),
        }
    }

    fn feed(items: Vec<FeedItem>) -> CachedFeed {
        CachedFeed {
            title: "Feed".to_string(),
            description: None,
            link: None,
            source_url: "https://example.com/feed".to_string(),
            fetched_at: Utc::now(),
            items,
        }
    }

    fn query(limit: usize, offset: usize) -> FeedQuery {
        FeedQuery {
            limit,
            offset,
            source: None,
            category: None,
        }
    }

    #[test]
    fn paginates_with_has_more_semantics() {
        let feeds = vec![feed((1..=5).map(|d| item(&format!("i{d}"), "a", "tech", d)).collect())];

        let (page, total) = page_items(feeds, &query(2, 0));
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        // Newest first: day 5 then day 4.
        assert_eq!(page[0].id, "i5");
        assert_eq!(page[1].id, "i4");
    }

    #[test]
    fn offset_skips_items() {
        let feeds = vec![feed((1..=5).map(|d| item(&format!("i{d}"), "a", "tech", d)).collect())];

        let (page, _) = page_items(feeds, &query(2, 4));
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, "i1");
    }

    #[test]
    fn filters_by_source_and_category() {
        let feeds = vec![
            feed(vec![item("a1", "a", "tech", 1), item("a2", "a", "news", 2)]),
            feed(vec![item("b1", "b", "tech", 3)]),
        ];

        let mut q = query(50, 0);
        q.source = Some("a".to_string());
        let (page, total) = page_items(feeds.clone(), &q);
        assert_eq!(total, 2);
        assert!(page.iter().all(|i| i.source_id == "a"));

        let mut q = query(50, 0);
        q.category = Some("tech".to_string());
        let (page, total) = page_items(feeds, &q);
        assert_eq!(total, 2);
        assert!(page.iter().all(|i| i.source_category == "tech"));
    }

    #[test]
    fn duplicate_ids_across_sources_collapse() {
        let feeds = vec![
            feed(vec![item("shared", "a", "tech", 1)]),
            feed(vec![item("shared", "b", "tech", 2)]),
        ];

        let (_, total) = page_items(feeds, &query(50, 0));
        assert_eq!(total, 1);
    }
}
