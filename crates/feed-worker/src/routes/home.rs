//! Home page route.

use askama::Template;
use axum::extract::State;

use crate::crawler;
use crate::error::Result;
use crate::state::AppState;

/// How many items the home page shows.
const HOME_PAGE_ITEMS: usize = 50;

/// One rendered feed item.
pub struct ItemView {
    pub title: String,
    pub link: String,
    pub source_name: String,
    pub published: String,
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub items: Vec<ItemView>,
}

/// Render the latest aggregated items.
pub async fn home_page(State(state): State<AppState>) -> Result<HomeTemplate> {
    let feeds = crawler::load_cached_feeds(&state).await?;
    let items = crawler::aggregate(feeds)
        .into_iter()
        .take(HOME_PAGE_ITEMS)
        .map(|item| ItemView {
            title: item.title,
            link: item.link,
            source_name: item.source_name,
            published: item
                .published_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect();

    Ok(HomeTemplate { items })
}
