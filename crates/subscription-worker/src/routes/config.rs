//! Notification settings routes.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::state::AppState;
use crate::store::{self, NotificationSettings};

/// Settings response. The admin username is included for display; the admin
/// password and token secret are environment-only and never appear here.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub admin_username: String,
    #[serde(flatten)]
    pub settings: NotificationSettings,
}

/// `GET /api/config`
pub async fn get_config(State(state): State<AppState>) -> Result<Json<ConfigResponse>> {
    let settings = store::get_settings(&state.subs).await?;

    Ok(Json(ConfigResponse {
        admin_username: state.config.admin_username.clone(),
        settings,
    }))
}

/// `POST /api/config` — replace the stored notification settings.
pub async fn update_config(
    State(state): State<AppState>,
    Json(settings): Json<NotificationSettings>,
) -> Result<Json<serde_json::Value>> {
    store::save_settings(&state.subs, &settings).await?;
    info!(
        channels = settings.enabled_channels.len(),
        "Updated notification settings"
    );

    Ok(Json(serde_json::json!({ "success": true })))
}
