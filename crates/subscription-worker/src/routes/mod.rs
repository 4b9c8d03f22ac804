//! Route handlers for the subscription worker.

pub mod admin;
pub mod config;
pub mod notifications;
pub mod session;
pub mod subscriptions;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth;
use crate::state::AppState;

/// Build the router with all routes.
///
/// `/api/login` and `/api/logout` are public; every other `/api/*` route
/// answers 401 without a valid session cookie, and the admin pages redirect
/// to the login page instead.
pub fn router(state: AppState) -> Router<AppState> {
    let protected_api = Router::new()
        .route(
            "/api/subscriptions",
            get(subscriptions::list).post(subscriptions::create),
        )
        .route(
            "/api/subscriptions/:id",
            get(subscriptions::get_one)
                .put(subscriptions::update)
                .delete(subscriptions::delete),
        )
        .route(
            "/api/subscriptions/:id/toggle-status",
            post(subscriptions::toggle_status),
        )
        .route(
            "/api/subscriptions/:id/test-notify",
            post(subscriptions::test_notify),
        )
        .route(
            "/api/config",
            get(config::get_config).post(config::update_config),
        )
        .route(
            "/api/test-notification",
            post(notifications::test_notification),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth_api,
        ));

    let admin_pages = Router::new()
        .route("/admin", get(admin::admin_page))
        .route("/admin/config", get(admin::config_page))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_auth_page,
        ));

    Router::new()
        .merge(protected_api)
        .merge(admin_pages)
        .route("/", get(admin::login_page))
        .route("/api/login", post(session::login))
        .route("/api/logout", get(session::logout))
}
