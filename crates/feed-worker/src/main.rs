//! Feed aggregation worker.
//!
//! Crawls configured RSS/Atom sources on a schedule, caches parsed feeds in
//! the KV store, and serves the aggregated, deduplicated item stream.

mod config;
mod crawler;
mod error;
mod routes;
mod sources;
mod state;

use std::time::Duration;

use kv_store::KvStore;
use tracing::{error, info};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting feed worker");

    let store = KvStore::connect(&config.kv_url).await?;
    store.migrate().await?;

    let state = AppState::new(
        store.namespace("feed-sources"),
        store.namespace("feed-cache"),
    );

    // Periodic crawl, detached from request handling. Failures are logged
    // and the loop keeps going; the first tick fires immediately so a fresh
    // deployment has data without waiting a full interval.
    let crawl_state = state.clone();
    let crawl_interval = Duration::from_secs(config.crawl_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(crawl_interval);
        loop {
            interval.tick().await;
            match crawler::run_crawler(&crawl_state).await {
                Ok(report) => info!(
                    sources_ok = report.success.len(),
                    sources_failed = report.failed.len(),
                    aggregated_items = report.aggregated_items,
                    "Scheduled crawl finished"
                ),
                Err(e) => error!("Scheduled crawl failed: {}", e),
            }
        }
    });

    let app = routes::router()
        .layer(service_core::cors_layer())
        .with_state(state);

    info!(addr = %config.addr, "Feed worker listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
