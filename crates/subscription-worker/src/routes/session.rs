//! Login and logout routes.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::Json;
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite};
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth;
use crate::state::AppState;

/// Login request.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /api/login` — issue the session cookie.
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    if req.username != state.config.admin_username
        || req.password != state.config.admin_password
    {
        warn!(username = %req.username, "Rejected login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "success": false,
                "message": "Invalid username or password"
            })),
        )
            .into_response();
    }

    let token = auth::sign_token(&req.username, &state.config.token_secret);
    let cookie = Cookie::build(("token", token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::days(1))
        .build();

    info!(username = %req.username, "Login succeeded");

    (
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(serde_json::json!({ "success": true })),
    )
        .into_response()
}

/// `GET /api/logout` — clear the session cookie and go back to the login
/// page.
pub async fn logout() -> Response {
    let cookie = Cookie::build(("token", ""))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::seconds(0))
        .build();

    (
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Redirect::to("/"),
    )
        .into_response()
}
