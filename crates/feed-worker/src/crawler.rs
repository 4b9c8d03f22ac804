//! Feed crawling, parsing and aggregation.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use feed_rs::parser;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::sources::{self, Source};
use crate::state::AppState;

/// How long per-source caches live.
const FEED_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// How long the aggregated snapshot lives.
const AGGREGATED_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Retention cap for the aggregated snapshot.
const MAX_AGGREGATED_ITEMS: usize = 1000;

/// KV key of the aggregated snapshot.
pub const AGGREGATED_KEY: &str = "aggregated:latest";

/// Errors that can occur while crawling.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Fetching the feed failed.
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The response was not a parseable feed.
    #[error("feed parsing failed: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),

    /// KV store error.
    #[error("kv store error: {0}")]
    Kv(#[from] kv_store::KvError),

    /// Triggered for a source id that is not configured.
    #[error("source not found: {0}")]
    SourceNotFound(String),
}

/// One aggregated feed item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Stable id: the entry guid, or a hash of title + link.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub link: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub source_category: String,
}

/// A parsed feed cached per source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedFeed {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub items: Vec<FeedItem>,
}

/// The aggregated snapshot stored under [`AGGREGATED_KEY`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSnapshot {
    pub items: Vec<FeedItem>,
    pub updated_at: DateTime<Utc>,
    pub count: usize,
}

/// Per-source outcome of a crawl run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCrawlSummary {
    pub source_id: String,
    pub source_name: String,
    pub item_count: usize,
    pub fetched_at: DateTime<Utc>,
}

/// Per-source failure of a crawl run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCrawlFailure {
    pub source_id: String,
    pub source_name: String,
    pub error: String,
}

/// Report of a full crawl run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    pub success: Vec<SourceCrawlSummary>,
    pub failed: Vec<SourceCrawlFailure>,
    pub total_items: usize,
    pub aggregated_items: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Fetch and parse one feed URL.
pub async fn fetch_feed(http: &reqwest::Client, url: &str) -> Result<CachedFeed, CrawlError> {
    let response = http
        .get(url)
        .header("User-Agent", "nimbus-feed-worker/1.0")
        .header(
            "Accept",
            "application/rss+xml, application/atom+xml, application/xml, text/xml",
        )
        .send()
        .await?
        .error_for_status()?;

    let bytes = response.bytes().await?;
    let feed = parser::parse(&bytes[..])?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| "Untitled".to_string());
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();

            FeedItem {
                id: item_id(&entry.id, &title, &link),
                description: entry.summary.map(|s| s.content),
                author: entry.authors.first().map(|a| a.name.clone()),
                category: entry.categories.first().map(|c| c.term.clone()),
                published_at: entry.published.or(entry.updated),
                source_id: String::new(),
                source_name: String::new(),
                source_category: String::new(),
                title,
                link,
            }
        })
        .collect();

    Ok(CachedFeed {
        title: feed
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| url.to_string()),
        description: feed.description.map(|d| d.content),
        link: feed.links.first().map(|l| l.href.clone()),
        source_url: url.to_string(),
        fetched_at: Utc::now(),
        items,
    })
}

/// Stable item id: guid when present, otherwise a hash of title + link so
/// the same item read from two sources deduplicates.
fn item_id(guid: &str, title: &str, link: &str) -> String {
    if guid.trim().is_empty() {
        service_core::md5_hex(&format!("{title}{link}"))
    } else {
        guid.to_string()
    }
}

/// Crawl one configured source and cache its feed.
pub async fn crawl_source(state: &AppState, source: &Source) -> Result<CachedFeed, CrawlError> {
    let mut feed = fetch_feed(&state.http, &source.url).await?;

    for item in &mut feed.items {
        item.source_id = source.id.clone();
        item.source_name = source.name.clone();
        item.source_category = source.category.clone();
    }

    state
        .cache
        .put_json_with_ttl(&format!("feed:{}", source.id), &feed, FEED_CACHE_TTL)
        .await?;

    Ok(feed)
}

/// Crawl every active source concurrently and refresh the aggregated
/// snapshot. Individual source failures are reported, not fatal.
pub async fn run_crawler(state: &AppState) -> Result<CrawlReport, CrawlError> {
    let started_at = Utc::now();

    sources::initialize_default_sources(&state.sources).await?;

    let all_sources = load_sources(state).await?;
    let active: Vec<_> = all_sources.into_iter().filter(|s| s.active).collect();

    info!(count = active.len(), "Crawling active feed sources");

    let crawls = active.iter().map(|source| async move {
        match crawl_source(state, source).await {
            Ok(feed) => {
                info!(
                    source = %source.name,
                    items = feed.items.len(),
                    "Crawled feed source"
                );
                Ok((source, feed))
            }
            Err(e) => {
                warn!(source = %source.name, "Failed to crawl feed source: {}", e);
                Err((source, e))
            }
        }
    });

    let mut report = CrawlReport {
        success: Vec::new(),
        failed: Vec::new(),
        total_items: 0,
        aggregated_items: 0,
        started_at,
        finished_at: started_at,
    };

    let mut fetched = Vec::new();
    for outcome in join_all(crawls).await {
        match outcome {
            Ok((source, feed)) => {
                report.success.push(SourceCrawlSummary {
                    source_id: source.id.clone(),
                    source_name: source.name.clone(),
                    item_count: feed.items.len(),
                    fetched_at: feed.fetched_at,
                });
                report.total_items += feed.items.len();
                fetched.push(feed);
            }
            Err((source, e)) => report.failed.push(SourceCrawlFailure {
                source_id: source.id.clone(),
                source_name: source.name.clone(),
                error: e.to_string(),
            }),
        }
    }

    let aggregated = aggregate(fetched);
    report.aggregated_items = aggregated.len();

    let snapshot = AggregatedSnapshot {
        updated_at: Utc::now(),
        count: aggregated.len(),
        items: aggregated,
    };
    state
        .cache
        .put_json_with_ttl(AGGREGATED_KEY, &snapshot, AGGREGATED_TTL)
        .await?;

    report.finished_at = Utc::now();
    Ok(report)
}

/// Merge fetched feeds: deduplicate by item id, newest first, capped.
pub fn aggregate(feeds: Vec<CachedFeed>) -> Vec<FeedItem> {
    let mut seen = HashSet::new();
    let mut items: Vec<FeedItem> = feeds
        .into_iter()
        .flat_map(|feed| feed.items)
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    items.sort_by(|a, b| {
        let a_date = a.published_at.unwrap_or(DateTime::<Utc>::MIN_UTC);
        let b_date = b.published_at.unwrap_or(DateTime::<Utc>::MIN_UTC);
        b_date.cmp(&a_date)
    });

    items.truncate(MAX_AGGREGATED_ITEMS);
    items
}

/// Load every configured source.
pub async fn load_sources(state: &AppState) -> Result<Vec<Source>, CrawlError> {
    let mut loaded = Vec::new();
    for entry in state.sources.list("source:").await? {
        match serde_json::from_str::<Source>(&entry.value) {
            Ok(source) => loaded.push(source),
            Err(e) => warn!(key = %entry.key, "Skipping unparseable source config: {}", e),
        }
    }
    Ok(loaded)
}

/// Load all cached per-source feeds.
pub async fn load_cached_feeds(state: &AppState) -> Result<Vec<CachedFeed>, CrawlError> {
    let mut feeds = Vec::new();
    for entry in state.cache.list("feed:").await? {
        match serde_json::from_str::<CachedFeed>(&entry.value) {
            Ok(feed) => feeds.push(feed),
            Err(e) => warn!(key = %entry.key, "Skipping unparseable cached feed: {}", e),
        }
    }
    Ok(feeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: &str, published: Option<DateTime<Utc>>) -> FeedItem {
        FeedItem {
            id: id.to_string(),
            title: format!("title {id}"),
            description: None,
            link: format!("https://example.com/{id}"),
            author: None,
            category: None,
            published_at: published,
            source_id: "src".to_string(),
            source_name: "Source".to_string(),
            source_category: "tech".to_string(),
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

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn aggregate_deduplicates_across_feeds() {
        let a = feed(vec![item("shared", Some(date(1))), item("only-a", Some(date(2)))]);
        let b = feed(vec![item("shared", Some(date(1))), item("only-b", Some(date(3)))]);

        let merged = aggregate(vec![a, b]);
        let ids: Vec<_> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(merged.len(), 3);
        assert!(ids.contains(&"shared"));
        assert!(ids.contains(&"only-a"));
        assert!(ids.contains(&"only-b"));
    }

    #[test]
    fn aggregate_sorts_newest_first() {
        let feeds = vec![feed(vec![
            item("old", Some(date(1))),
            item("new", Some(date(9))),
            item("mid", Some(date(5))),
        ])];

        let merged = aggregate(feeds);
        let ids: Vec<_> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn aggregate_puts_undated_items_last() {
        let feeds = vec![feed(vec![item("undated", None), item("dated", Some(date(1)))])];

        let merged = aggregate(feeds);
        assert_eq!(merged[0].id, "dated");
        assert_eq!(merged[1].id, "undated");
    }

    #[test]
    fn aggregate_caps_retention() {
        let items: Vec<FeedItem> = (0..1500)
            .map(|i| item(&format!("item-{i}"), Some(date(1 + (i % 28) as u32))))
            .collect();

        let merged = aggregate(vec![feed(items)]);
        assert_eq!(merged.len(), MAX_AGGREGATED_ITEMS);
    }

    #[test]
    fn item_id_prefers_guid() {
        assert_eq!(item_id("guid-1", "t", "l"), "guid-1");
    }

    #[test]
    fn item_id_falls_back_to_content_hash() {
        let a = item_id("", "Title", "https://example.com/a");
        let b = item_id("  ", "Title", "https://example.com/a");
        assert_eq!(a, b);
        assert_ne!(a, item_id("", "Title", "https://example.com/b"));
    }

    #[test]
    fn parses_a_minimal_rss_document() {
        let xml = r#"<?xml version="1.0"?>
            <rss version="2.0">
              <channel>
                <title>Example Feed</title>
                <link>https://example.com</link>
                <description>Example</description>
                <item>
                  <title>First post</title>
                  <link>https://example.com/first</link>
                  <guid>post-1</guid>
                  <pubDate>Mon, 03 Aug 2026 10:00:00 GMT</pubDate>
                </item>
                <item>
                  <title>Second post</title>
                  <link>https://example.com/second</link>
                </item>
              </channel>
            </rss>"#;

        let feed = parser::parse(xml.as_bytes()).unwrap();
        assert_eq!(feed.entries.len(), 2);
        assert_eq!(feed.title.unwrap().content, "Example Feed");
    }
}
