//! Image generation worker.
//!
//! Proxies image prompts to a hosted text-to-image model and caches the
//! generated images in the KV store with a one-hour TTL.

mod config;
mod error;
mod routes;
mod state;

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
    info!(addr = %config.addr, "Starting image worker");

    let store = KvStore::connect(&config.kv_url).await?;
    store.migrate().await?;

    let inference = InferenceClient::new(InferenceConfig::from_env()?)?;

    let state = AppState::new(store.namespace("image-cache"), inference);

    let app = routes::router()
        .layer(service_core::cors_layer())
        .with_state(state);

    info!(addr = %config.addr, "Image worker listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
