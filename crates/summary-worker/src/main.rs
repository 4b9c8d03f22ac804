//! Text summarization worker.
//!
//! Proxies text to a hosted chat model for summarization with a TTL cache,
//! and serves the legacy blog-summary API (signed-hash content uploads,
//! on-demand summary generation, click counters) backed by the relational
//! store.

mod config;
mod error;
mod routes;
mod state;

use database::Database;
use inference::{InferenceClient, InferenceConfig};
use kv_store::KvStore;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting summary worker");

    let store = KvStore::connect(&config.kv_url).await?;
    store.migrate().await?;

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let inference = InferenceClient::new(InferenceConfig::from_env()?)?;

    let state = AppState::new(store.namespace("summary-cache"), db, inference);

    let app = routes::router()
        .layer(service_core::cors_layer())
        .with_state(state);

    info!(addr = %config.addr, "Summary worker listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
