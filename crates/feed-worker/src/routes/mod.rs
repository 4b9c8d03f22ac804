//! Route handlers for the feed worker.

pub mod crawler;
pub mod feeds;
pub mod health;
pub mod home;
pub mod sources;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health))
        // Source management
        .route(
            "/api/sources",
            get(sources::list_sources).post(sources::create_source),
        )
        .route(
            "/api/sources/:source_id",
            get(sources::get_source)
                .put(sources::update_source)
                .delete(sources::delete_source),
        )
        // Aggregated feeds
        .route("/api/feeds", get(feeds::aggregated_feeds))
        .route("/api/feeds/:source_id", get(feeds::feed_by_source))
        // Crawler control
        .route("/api/crawler/trigger", post(crawler::trigger))
        .route("/api/crawler/status", get(crawler::status))
}
