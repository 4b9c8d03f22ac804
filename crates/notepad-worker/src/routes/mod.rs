//! Route handlers for the notepad worker.

pub mod notes;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::new_note))
        .route("/:note_id", get(notes::note_page))
        .route(
            "/api/:note_id",
            get(notes::get_note).post(notes::save_note),
        )
}
