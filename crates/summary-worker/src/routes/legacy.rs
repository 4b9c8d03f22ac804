//! Legacy blog-summary API.
//!
//! These endpoints predate the JSON API and are consumed by existing blog
//! templates, so they keep their original contract: query-string parameters,
//! plain-text responses, and signed-hash validation (the caller proves it
//! knows the stored content by sending its SHA-256) instead of auth tokens.

use axum::extract::{Query, State};
use inference::ChatMessage;
use serde::Deserialize;
use service_core::{md5_hex, sha256_hex};
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// How much stored content is sent to the model, in characters.
const SUMMARY_INPUT_CHARS: usize = 5_000;

/// System prompt for blog article summarization.
const SUMMARY_SYSTEM_PROMPT: &str = "You are a professional article summarization assistant. \
Read the whole article, extract its key information and the author's main points and \
conclusions, and restate them concisely and neutrally. Do not editorialize, do not \
distort the author's views, and keep facts separate from the author's opinions. \
Reply with the summary text only, beginning with: This article";

/// Query parameters shared by the legacy endpoints.
#[derive(Debug, Deserialize)]
pub struct LegacyParams {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sign: Option<String>,
}

impl LegacyParams {
    /// The original API treated a missing id and the literal string "null"
    /// the same way; blog templates really do send the latter.
    fn article_id(&self) -> Option<&str> {
        match self.id.as_deref() {
            None | Some("") | Some("null") => None,
            Some(id) => Some(id),
        }
    }
}

/// Generate a summary for stored article content.
async fn generate_summary(state: &AppState, content: &str) -> Result<String> {
    let excerpt: String = content.chars().take(SUMMARY_INPUT_CHARS).collect();
    let messages = vec![
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(excerpt),
    ];

    Ok(state.inference.chat(messages, None, None, None).await?)
}

/// `GET /summary?id=` — generate a summary for stored content without
/// persisting it.
pub async fn preview_summary(
    State(state): State<AppState>,
    Query(params): Query<LegacyParams>,
) -> Result<String> {
    let Some(id) = params.article_id() else {
        return Ok("id cannot be none".to_string());
    };

    let Some(content) = database::article::get_content(state.db.pool(), id).await? else {
        return Ok("No Record".to_string());
    };

    generate_summary(&state, &content).await
}

/// `GET /get_summary?id=&sign=` — return the stored summary, generating and
/// persisting it on first request. The sign must be the SHA-256 of the
/// stored content.
pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<LegacyParams>,
) -> Result<String> {
    let Some(id) = params.article_id() else {
        return Ok("id cannot be none".to_string());
    };

    let Some(content) = database::article::get_content(state.db.pool(), id).await? else {
        return Ok("no".to_string());
    };

    if params.sign.as_deref() != Some(sha256_hex(&content).as_str()) {
        return Ok("no".to_string());
    }

    let article = database::article::get_article(state.db.pool(), id).await?;
    if let Some(summary) = article.summary {
        return Ok(summary);
    }

    let summary = generate_summary(&state, &content).await?;
    database::article::set_summary(state.db.pool(), id, &summary).await?;
    info!(article = id, "Generated and stored article summary");

    Ok(summary)
}

/// `GET /is_uploaded?id=&sign=` — "yes" when content with this hash is stored.
pub async fn is_uploaded(
    State(state): State<AppState>,
    Query(params): Query<LegacyParams>,
) -> Result<String> {
    let Some(id) = params.article_id() else {
        return Ok("id cannot be none".to_string());
    };

    let Some(content) = database::article::get_content(state.db.pool(), id).await? else {
        return Ok("no".to_string());
    };

    if params.sign.as_deref() == Some(sha256_hex(&content).as_str()) {
        Ok("yes".to_string())
    } else {
        Ok("no".to_string())
    }
}

/// `POST /upload_blog?id=` — store article content. Identical content keeps
/// the existing summary; changed content resets it.
pub async fn upload_blog(
    State(state): State<AppState>,
    Query(params): Query<LegacyParams>,
    body: String,
) -> Result<String> {
    let Some(id) = params.article_id() else {
        return Ok("id cannot be none".to_string());
    };

    database::article::upsert_content(state.db.pool(), id, &body).await?;

    Ok("OK".to_string())
}

/// `GET /count_click?id=` — current click count as a plain number.
pub async fn count_click(
    State(state): State<AppState>,
    Query(params): Query<LegacyParams>,
) -> Result<String> {
    let Some(id) = params.article_id() else {
        return Ok("id cannot be none".to_string());
    };

    let count = database::clicks::get_clicks(state.db.pool(), &md5_hex(id)).await?;
    Ok(count.to_string())
}

/// `GET /count_click_add?id=` — increment and return the click count.
pub async fn count_click_add(
    State(state): State<AppState>,
    Query(params): Query<LegacyParams>,
) -> Result<String> {
    let Some(id) = params.article_id() else {
        return Ok("id cannot be none".to_string());
    };

    let count = database::clicks::increment_clicks(state.db.pool(), &md5_hex(id)).await?;
    Ok(count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(id: Option<&str>, sign: Option<&str>) -> LegacyParams {
        LegacyParams {
            id: id.map(str::to_string),
            sign: sign.map(str::to_string),
        }
    }

    #[test]
    fn article_id_filters_null_and_empty() {
        assert_eq!(params(None, None).article_id(), None);
        assert_eq!(params(Some(""), None).article_id(), None);
        assert_eq!(params(Some("null"), None).article_id(), None);
        assert_eq!(params(Some("post-1"), None).article_id(), Some("post-1"));
    }

    #[test]
    fn sign_comparison_uses_content_hash() {
        let content = "article body";
        let good = sha256_hex(content);
        let p = params(Some("post-1"), Some(&good));
        assert_eq!(p.sign.as_deref(), Some(good.as_str()));
        assert_ne!(sha256_hex("other body"), good);
    }
}
