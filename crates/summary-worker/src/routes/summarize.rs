//! Text summarization route.

use std::time::Duration;

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use inference::ChatMessage;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// How long summaries stay cached.
const CACHE_TTL: Duration = Duration::from_secs(7200);

/// Longest accepted input, in characters.
const MAX_TEXT_CHARS: usize = 10_000;

/// How much of the text participates in the cache key.
const CACHE_KEY_PREFIX_CHARS: usize = 100;

/// Request to summarize a text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_max_length() -> u32 {
    200
}

fn default_style() -> String {
    "concise".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

/// Summarization response.
#[derive(Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub cached: bool,
}

/// Summarize a text, serving repeated requests from the cache.
pub async fn summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation("Text is required".to_string()));
    }

    let char_count = req.text.chars().count();
    if char_count > MAX_TEXT_CHARS {
        return Err(ApiError::Validation(format!(
            "Text too long (max {MAX_TEXT_CHARS} characters)"
        )));
    }

    let model = req.model.as_deref();
    let key = cache_key(
        model.unwrap_or_else(|| state.inference.config().chat_model.as_str()),
        req.max_length,
        &req.style,
        &req.language,
        &req.text,
    );

    if let Some(summary) = state.cache.get(&key).await? {
        return Ok(Json(SummarizeResponse {
            summary,
            cached: true,
        }));
    }

    let prompt = build_prompt(&req.text, req.max_length, &req.style, &req.language);
    let max_tokens = (req.max_length * 2).min(1000);

    let summary = state
        .inference
        .chat(vec![ChatMessage::user(prompt)], model, Some(max_tokens), None)
        .await?;

    state.cache.put_with_ttl(&key, &summary, CACHE_TTL).await?;
    info!(chars = char_count, "Generated and cached summary");

    Ok(Json(SummarizeResponse {
        summary,
        cached: false,
    }))
}

/// Cache key: model + shaping parameters + base64 of the text prefix.
fn cache_key(model: &str, max_length: u32, style: &str, language: &str, text: &str) -> String {
    let prefix: String = text.chars().take(CACHE_KEY_PREFIX_CHARS).collect();
    format!(
        "{}_{}_{}_{}_{}",
        model,
        max_length,
        style,
        language,
        BASE64.encode(prefix)
    )
}

/// Human-readable rendering of a summary style.
fn style_instruction(style: &str) -> &'static str {
    match style {
        "detailed" => "detailed and complete",
        "bullet" => "a bulleted list of key points",
        "academic" => "academic in tone",
        "casual" => "casual and conversational",
        _ => "concise and clear",
    }
}

/// Build the summarization prompt.
fn build_prompt(text: &str, max_length: u32, style: &str, language: &str) -> String {
    format!(
        "Summarize the following text. Requirements:\n\
         1. Keep the summary under {max_length} characters.\n\
         2. Style: {}.\n\
         3. Language: {language}.\n\
         4. Preserve the important information and key points.\n\
         5. Be accurate and complete.\n\n\
         Text:\n{text}\n\nSummary:",
        style_instruction(style)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_deterministic() {
        let a = cache_key("m", 200, "concise", "en-US", "some long article text");
        let b = cache_key("m", 200, "concise", "en-US", "some long article text");
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_varies_with_parameters() {
        let base = cache_key("m", 200, "concise", "en-US", "text");
        assert_ne!(base, cache_key("other", 200, "concise", "en-US", "text"));
        assert_ne!(base, cache_key("m", 300, "concise", "en-US", "text"));
        assert_ne!(base, cache_key("m", 200, "bullet", "en-US", "text"));
        assert_ne!(base, cache_key("m", 200, "concise", "ja-JP", "text"));
        assert_ne!(base, cache_key("m", 200, "concise", "en-US", "other"));
    }

    #[test]
    fn cache_key_ignores_text_beyond_prefix() {
        let long_a = format!("{}{}", "x".repeat(CACHE_KEY_PREFIX_CHARS), "tail one");
        let long_b = format!("{}{}", "x".repeat(CACHE_KEY_PREFIX_CHARS), "tail two");
        assert_eq!(
            cache_key("m", 200, "concise", "en-US", &long_a),
            cache_key("m", 200, "concise", "en-US", &long_b)
        );
    }

    #[test]
    fn cache_key_handles_multibyte_text() {
        // Prefix slicing is by character, so multibyte input must not panic.
        let text = "日本語のテキスト".repeat(40);
        let key = cache_key("m", 200, "concise", "ja-JP", &text);
        assert!(!key.is_empty());
    }

    #[test]
    fn prompt_includes_shaping_parameters() {
        let prompt = build_prompt("the article", 300, "bullet", "en-US");
        assert!(prompt.contains("under 300 characters"));
        assert!(prompt.contains("bulleted list"));
        assert!(prompt.contains("en-US"));
        assert!(prompt.contains("the article"));
    }

    #[test]
    fn unknown_style_falls_back_to_concise() {
        assert_eq!(style_instruction("zany"), "concise and clear");
    }
}
