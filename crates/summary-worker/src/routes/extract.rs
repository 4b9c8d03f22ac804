//! URL text extraction route.

use axum::extract::State;
use axum::Json;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Longest extracted text returned, in characters.
const MAX_EXTRACT_CHARS: usize = 5_000;

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static STYLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Request to extract text from a URL.
#[derive(Deserialize)]
pub struct ExtractRequest {
    pub url: String,
}

/// Extraction response.
#[derive(Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub url: String,
}

/// Fetch a page and return its visible text, truncated.
pub async fn extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>> {
    if req.url.trim().is_empty() {
        return Err(ApiError::Validation("URL is required".to_string()));
    }

    let response = state.http.get(&req.url).send().await?;
    let response = response.error_for_status()?;
    let html = response.text().await?;

    let text: String = strip_html(&html).chars().take(MAX_EXTRACT_CHARS).collect();

    Ok(Json(ExtractResponse { text, url: req.url }))
}

/// Remove script and style blocks, strip the remaining tags, and collapse
/// runs of whitespace.
fn strip_html(html: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, "");
    let without_styles = STYLE_RE.replace_all(&without_scripts, "");
    let without_tags = TAG_RE.replace_all(&without_styles, "");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        let html = "<html><body><h1>Title</h1>\n\n<p>First   paragraph.</p></body></html>";
        assert_eq!(strip_html(html), "Title First paragraph.");
    }

    #[test]
    fn removes_script_and_style_content() {
        let html = r#"<script>alert("x")</script><style>body { color: red }</style><p>Kept</p>"#;
        assert_eq!(strip_html(html), "Kept");
    }

    #[test]
    fn script_removal_spans_lines() {
        let html = "<p>A</p><script>\nlet x = 1;\nlet y = 2;\n</script><p>B</p>";
        assert_eq!(strip_html(html), "A B");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_html("no markup here"), "no markup here");
    }
}
