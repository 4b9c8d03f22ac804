//! Feed source configuration storage.

use chrono::Utc;
use kv_store::{Namespace, Result};
use serde::{Deserialize, Serialize};

/// A configured feed source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Derive a stable source id from its URL.
pub fn source_id_from_url(url: &str) -> String {
    url.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// A feed URL must be an absolute http(s) URL.
pub fn is_valid_feed_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

fn storage_key(source_id: &str) -> String {
    format!("source:{source_id}")
}

/// Store a source configuration, stamping timestamps.
pub async fn save_source(ns: &Namespace, source: &mut Source) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    if source.created_at.is_none() {
        source.created_at = Some(now.clone());
    }
    source.updated_at = Some(now);

    ns.put_json(&storage_key(&source.id), source).await?;
    Ok(())
}

/// Get a source configuration by id.
pub async fn get_source(ns: &Namespace, source_id: &str) -> Result<Option<Source>> {
    Ok(ns.get_json(&storage_key(source_id)).await?)
}

/// List all source configurations.
pub async fn list_sources(ns: &Namespace) -> Result<Vec<Source>> {
    let mut sources = Vec::new();
    for entry in ns.list("source:").await? {
        sources.push(serde_json::from_str(&entry.value)?);
    }
    Ok(sources)
}

/// Delete a source configuration and its cached feed.
pub async fn delete_source(ns: &Namespace, cache: &Namespace, source_id: &str) -> Result<()> {
    ns.delete(&storage_key(source_id)).await?;
    cache.delete(&format!("feed:{source_id}")).await?;
    Ok(())
}

/// The sources a fresh deployment starts with.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source {
            id: "hackernews".to_string(),
            name: "Hacker News".to_string(),
            url: "https://feeds.feedburner.com/ycombinator".to_string(),
            description: Some("Latest stories from Hacker News".to_string()),
            category: "tech".to_string(),
            active: true,
            created_at: None,
            updated_at: None,
        },
        Source {
            id: "github_trending".to_string(),
            name: "GitHub Trending".to_string(),
            url: "https://github.com/trending.atom".to_string(),
            description: Some("Trending repositories on GitHub".to_string()),
            category: "tech".to_string(),
            active: true,
            created_at: None,
            updated_at: None,
        },
        Source {
            id: "dev_to".to_string(),
            name: "Dev.to".to_string(),
            url: "https://dev.to/feed".to_string(),
            description: Some("Latest articles from Dev.to".to_string()),
            category: "tech".to_string(),
            active: true,
            created_at: None,
            updated_at: None,
        },
    ]
}

/// Register the default sources that are not already configured.
pub async fn initialize_default_sources(ns: &Namespace) -> Result<()> {
    for mut source in default_sources() {
        if get_source(ns, &source.id).await?.is_none() {
            save_source(ns, &mut source).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_replaces_non_alphanumerics() {
        assert_eq!(
            source_id_from_url("https://dev.to/feed"),
            "https___dev_to_feed"
        );
    }

    #[test]
    fn source_id_lowercases() {
        assert_eq!(source_id_from_url("HTTPS://A.B"), "https___a_b");
    }

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(is_valid_feed_url("https://example.com/feed.xml"));
        assert!(is_valid_feed_url("http://example.com/rss"));
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(!is_valid_feed_url("ftp://example.com/feed"));
        assert!(!is_valid_feed_url("not a url"));
        assert!(!is_valid_feed_url(""));
    }
}
