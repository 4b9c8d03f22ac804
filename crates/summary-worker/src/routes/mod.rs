//! Route handlers for the summary worker.

pub mod extract;
pub mod home;
pub mod legacy;
pub mod models;
pub mod summarize;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home_page))
        // JSON API
        .route("/api/summarize", post(summarize::summarize))
        .route("/api/models", get(models::models_api))
        .route("/api/extract", post(extract::extract))
        // Legacy plain-text blog API
        .route("/summary", get(legacy::preview_summary))
        .route("/get_summary", get(legacy::get_summary))
        .route("/is_uploaded", get(legacy::is_uploaded))
        .route("/upload_blog", post(legacy::upload_blog))
        .route("/count_click", get(legacy::count_click))
        .route("/count_click_add", get(legacy::count_click_add))
}
