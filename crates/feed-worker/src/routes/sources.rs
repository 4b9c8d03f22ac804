//! Feed source management routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::sources::{self, Source};
use crate::state::AppState;

/// Source list response.
#[derive(Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<Source>,
}

/// Single-source response.
#[derive(Serialize)]
pub struct SourceResponse {
    pub source: Source,
}

/// Mutation confirmation.
#[derive(Serialize)]
pub struct SourceMutationResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

/// Request to register a source.
#[derive(Deserialize)]
pub struct CreateSourceRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

/// Request to update a source; unset fields keep their values.
#[derive(Deserialize)]
pub struct UpdateSourceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// List every configured source.
pub async fn list_sources(State(state): State<AppState>) -> Result<Json<SourcesResponse>> {
    let sources = sources::list_sources(&state.sources).await?;
    Ok(Json(SourcesResponse { sources }))
}

/// Get one source.
pub async fn get_source(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
) -> Result<Json<SourceResponse>> {
    let source = sources::get_source(&state.sources, &source_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Source not found".to_string()))?;

    Ok(Json(SourceResponse { source }))
}

/// Register a new source. The id is derived from the URL, so registering the
/// same URL twice conflicts.
pub async fn create_source(
    State(state): State<AppState>,
    Json(req): Json<CreateSourceRequest>,
) -> Result<(StatusCode, Json<SourceMutationResponse>)> {
    let (Some(name), Some(url)) = (req.name, req.url) else {
        return Err(ApiError::Validation(
            "Missing required fields: name, url".to_string(),
        ));
    };

    if !sources::is_valid_feed_url(&url) {
        return Err(ApiError::Validation("Invalid RSS URL format".to_string()));
    }

    let source_id = sources::source_id_from_url(&url);
    if sources::get_source(&state.sources, &source_id).await?.is_some() {
        return Err(ApiError::Conflict("RSS source already exists".to_string()));
    }

    let mut source = Source {
        id: source_id,
        name,
        url,
        description: req.description,
        category: req.category,
        active: true,
        created_at: None,
        updated_at: None,
    };
    sources::save_source(&state.sources, &mut source).await?;
    info!(source = %source.id, "Registered feed source");

    Ok((
        StatusCode::CREATED,
        Json(SourceMutationResponse {
            message: "RSS source created successfully".to_string(),
            source: Some(source),
        }),
    ))
}

/// Update an existing source.
pub async fn update_source(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    Json(req): Json<UpdateSourceRequest>,
) -> Result<Json<SourceMutationResponse>> {
    let mut source = sources::get_source(&state.sources, &source_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Source not found".to_string()))?;

    if let Some(url) = &req.url {
        if !sources::is_valid_feed_url(url) {
            return Err(ApiError::Validation("Invalid RSS URL format".to_string()));
        }
    }

    if let Some(name) = req.name {
        source.name = name;
    }
    if let Some(url) = req.url {
        source.url = url;
    }
    if let Some(description) = req.description {
        source.description = Some(description);
    }
    if let Some(category) = req.category {
        source.category = category;
    }
    if let Some(active) = req.active {
        source.active = active;
    }

    sources::save_source(&state.sources, &mut source).await?;

    Ok(Json(SourceMutationResponse {
        message: "RSS source updated successfully".to_string(),
        source: Some(source),
    }))
}

/// Delete a source and its cached feed.
pub async fn delete_source(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
) -> Result<Json<SourceMutationResponse>> {
    if sources::get_source(&state.sources, &source_id).await?.is_none() {
        return Err(ApiError::NotFound("Source not found".to_string()));
    }

    sources::delete_source(&state.sources, &state.cache, &source_id).await?;
    info!(source = %source_id, "Deleted feed source");

    Ok(Json(SourceMutationResponse {
        message: "RSS source deleted successfully".to_string(),
        source: None,
    }))
}
