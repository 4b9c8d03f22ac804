//! Route handlers for the image worker.

pub mod generate;
pub mod home;
pub mod models;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home_page))
        .route("/api/generate", post(generate::generate))
        .route("/api/models", get(models::models_api))
}
