//! Cloud notepad worker.
//!
//! Stores raw text blobs in the KV store, keyed by generated short ids. The
//! root path redirects to a freshly generated note; each note has an editor
//! page with debounced autosave.

mod config;
mod error;
mod routes;
mod state;

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
    info!(addr = %config.addr, "Starting notepad worker");

    let store = KvStore::connect(&config.kv_url).await?;
    store.migrate().await?;

    let state = AppState::new(store.namespace("notes"));

    let app = routes::router()
        .layer(service_core::cors_layer())
        .with_state(state);

    info!(addr = %config.addr, "Notepad worker listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
