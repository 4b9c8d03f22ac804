//! Crawler control routes.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crawler::{self, CrawlError, CrawlReport};
use crate::error::Result;
use crate::sources;
use crate::state::AppState;

/// Request to trigger a crawl; without a source id every active source is
/// crawled.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    #[serde(default)]
    pub source_id: Option<String>,
}

/// Crawl trigger response.
#[derive(Serialize)]
pub struct TriggerResponse {
    pub message: String,
    pub result: TriggerResult,
}

/// Either a full-run report or a single-source summary.
#[derive(Serialize)]
#[serde(untagged)]
pub enum TriggerResult {
    Full(CrawlReport),
    Single {
        success: bool,
        #[serde(rename = "sourceId")]
        source_id: String,
        #[serde(rename = "itemCount")]
        item_count: usize,
        #[serde(rename = "fetchedAt")]
        fetched_at: DateTime<Utc>,
    },
}

/// Per-source line of the status report.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub last_fetch: Option<DateTime<Utc>>,
    pub item_count: usize,
}

/// Crawler status report.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerStatus {
    pub total_sources: usize,
    pub active_sources: usize,
    pub cached_feeds: usize,
    pub last_update: Option<DateTime<Utc>>,
    pub sources: Vec<SourceStatus>,
}

/// Status wrapper.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: CrawlerStatus,
}

/// `POST /api/crawler/trigger` — crawl now, optionally a single source.
pub async fn trigger(
    State(state): State<AppState>,
    body: Option<Json<TriggerRequest>>,
) -> Result<Json<TriggerResponse>> {
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let result = match req.source_id {
        Some(source_id) => {
            let source = sources::get_source(&state.sources, &source_id)
                .await?
                .ok_or_else(|| CrawlError::SourceNotFound(source_id.clone()))?;

            let feed = crawler::crawl_source(&state, &source).await?;
            TriggerResult::Single {
                success: true,
                source_id: source.id,
                item_count: feed.items.len(),
                fetched_at: feed.fetched_at,
            }
        }
        None => TriggerResult::Full(crawler::run_crawler(&state).await?),
    };

    Ok(Json(TriggerResponse {
        message: "Crawler triggered successfully".to_string(),
        result,
    }))
}

/// `GET /api/crawler/status` — configured sources and their cache state.
pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>> {
    let all_sources = sources::list_sources(&state.sources).await?;
    let cached = crawler::load_cached_feeds(&state).await?;

    let mut last_update: Option<DateTime<Utc>> = None;
    let mut source_lines = Vec::with_capacity(all_sources.len());

    for source in &all_sources {
        let feed = cached.iter().find(|f| f.source_url == source.url);

        if let Some(feed) = feed {
            last_update = Some(match last_update {
                Some(current) => current.max(feed.fetched_at),
                None => feed.fetched_at,
            });
        }

        source_lines.push(SourceStatus {
            id: source.id.clone(),
            name: source.name.clone(),
            active: source.active,
            last_fetch: feed.map(|f| f.fetched_at),
            item_count: feed.map(|f| f.items.len()).unwrap_or(0),
        });
    }

    Ok(Json(StatusResponse {
        status: CrawlerStatus {
            total_sources: all_sources.len(),
            active_sources: all_sources.iter().filter(|s| s.active).count(),
            cached_feeds: cached.len(),
            last_update,
            sources: source_lines,
        },
    }))
}
