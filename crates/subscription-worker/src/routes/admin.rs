//! HTML pages: login and the admin console.

use askama::Template;

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate;

/// Admin console template.
#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate;

/// Settings page template.
#[derive(Template)]
#[template(path = "config.html")]
pub struct ConfigTemplate;

/// Render the login page.
pub async fn login_page() -> LoginTemplate {
    LoginTemplate
}

/// Render the admin console.
pub async fn admin_page() -> AdminTemplate {
    AdminTemplate
}

/// Render the settings page.
pub async fn config_page() -> ConfigTemplate {
    ConfigTemplate
}
