//! Note routes.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Length of generated note ids.
const NOTE_ID_LEN: usize = 8;

/// Editor page template.
#[derive(Template)]
#[template(path = "note.html")]
pub struct NoteTemplate {
    pub note_id: String,
}

/// Note content response.
#[derive(Serialize)]
pub struct NoteResponse {
    pub content: String,
    #[serde(rename = "noteId")]
    pub note_id: String,
}

/// Request to save note content.
#[derive(Deserialize)]
pub struct SaveRequest {
    pub content: String,
}

/// Save confirmation.
#[derive(Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "noteId")]
    pub note_id: String,
}

/// Redirect the root path to a freshly generated note.
pub async fn new_note() -> Redirect {
    let note_id = service_core::short_id(NOTE_ID_LEN);
    Redirect::temporary(&format!("/{note_id}"))
}

/// Render the editor page for a note.
pub async fn note_page(Path(note_id): Path<String>) -> Result<NoteTemplate> {
    validate_note_id(&note_id)?;
    Ok(NoteTemplate { note_id })
}

/// Get note content. Missing notes read as empty.
pub async fn get_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<NoteResponse>> {
    validate_note_id(&note_id)?;

    let content = state
        .notes
        .get(&storage_key(&note_id))
        .await?
        .unwrap_or_default();

    Ok(Json(NoteResponse { content, note_id }))
}

/// Save note content.
pub async fn save_note(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>> {
    validate_note_id(&note_id)?;

    state.notes.put(&storage_key(&note_id), &req.content).await?;
    debug!(note_id = %note_id, bytes = req.content.len(), "Saved note");

    Ok(Json(SaveResponse {
        success: true,
        message: "Note saved successfully".to_string(),
        note_id,
    }))
}

/// Note ids are URL path segments; restrict them to a safe alphabet.
fn validate_note_id(note_id: &str) -> Result<()> {
    let valid = !note_id.is_empty()
        && note_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(ApiError::InvalidNoteId)
    }
}

/// Storage key for a note id.
fn storage_key(note_id: &str) -> String {
    format!("note_{note_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_alphanumeric_ids_with_dash_and_underscore() {
        assert!(validate_note_id("abc123").is_ok());
        assert!(validate_note_id("a-b_c").is_ok());
        assert!(validate_note_id("XYZ").is_ok());
    }

    #[test]
    fn rejects_empty_and_unsafe_ids() {
        assert!(validate_note_id("").is_err());
        assert!(validate_note_id("a/b").is_err());
        assert!(validate_note_id("a b").is_err());
        assert!(validate_note_id("note?id").is_err());
        assert!(validate_note_id("日記").is_err());
    }

    #[test]
    fn storage_key_gets_note_prefix() {
        assert_eq!(storage_key("abc"), "note_abc");
    }
}
