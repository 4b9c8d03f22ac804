//! Subscription tracker worker.
//!
//! Cookie-token-gated CRUD over subscriptions and notification settings,
//! with a periodic sweep that auto-renews rolling subscriptions and sends
//! expiry reminders through the configured channels.

mod auth;
mod config;
mod error;
mod models;
mod routes;
mod scheduled;
mod state;
mod store;

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
    info!(addr = %config.addr, "Starting subscription worker");

    let store = KvStore::connect(&config.kv_url).await?;
    store.migrate().await?;

    let state = AppState::new(store.namespace("subscriptions"), config.clone());

    // Periodic reminder sweep, detached from request handling. Failures are
    // logged and the loop keeps going.
    let reminder_state = state.clone();
    let reminder_interval = Duration::from_secs(config.reminder_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(reminder_interval);
        loop {
            interval.tick().await;
            match scheduled::run_reminder_check(&reminder_state).await {
                Ok(report) => info!(
                    checked = report.checked,
                    renewed = report.renewed,
                    due = report.due,
                    "Reminder sweep finished"
                ),
                Err(e) => error!("Reminder sweep failed: {}", e),
            }
        }
    });

    let app = routes::router(state.clone())
        .layer(service_core::cors_layer())
        .with_state(state);

    info!(addr = %config.addr, "Subscription worker listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
