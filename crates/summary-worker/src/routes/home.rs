//! Home page route.

use askama::Template;

use crate::routes::models::{catalog, ModelInfo};

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub models: Vec<ModelInfo>,
}

/// Render the home page with the model catalog.
pub async fn home_page() -> HomeTemplate {
    HomeTemplate { models: catalog() }
}
