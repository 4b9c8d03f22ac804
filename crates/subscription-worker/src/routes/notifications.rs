//! Ad-hoc notification test route.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use notifier::{Channel, ChannelKind, Message, NotifyXChannel, TelegramChannel, WeComChannel};
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::store;

/// Request to test one channel, optionally with credentials that are not
/// saved yet (so the operator can verify them before storing).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestNotificationRequest {
    pub channel: ChannelKind,
    #[serde(default)]
    pub telegram_bot_token: Option<String>,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
    #[serde(default)]
    pub notifyx_api_key: Option<String>,
    #[serde(default)]
    pub wecom_webhook_url: Option<String>,
}

/// `POST /api/test-notification` — send a test message through one channel.
pub async fn test_notification(
    State(state): State<AppState>,
    Json(req): Json<TestNotificationRequest>,
) -> Result<Json<serde_json::Value>> {
    let stored = store::get_settings(&state.subs).await?;

    let channel: Box<dyn Channel> = match req.channel {
        ChannelKind::Telegram => {
            let token = req
                .telegram_bot_token
                .or(stored.telegram_bot_token)
                .ok_or_else(|| missing("Telegram bot token"))?;
            let chat_id = req
                .telegram_chat_id
                .or(stored.telegram_chat_id)
                .ok_or_else(|| missing("Telegram chat id"))?;
            Box::new(TelegramChannel::new(token, chat_id))
        }
        ChannelKind::Notifyx => {
            let key = req
                .notifyx_api_key
                .or(stored.notifyx_api_key)
                .ok_or_else(|| missing("NotifyX API key"))?;
            Box::new(NotifyXChannel::new(key))
        }
        ChannelKind::Wecom => {
            let url = req
                .wecom_webhook_url
                .or(stored.wecom_webhook_url)
                .ok_or_else(|| missing("WeCom webhook URL"))?;
            Box::new(WeComChannel::new(url))
        }
    };

    let message = Message::new(
        "Test notification",
        format!(
            "This is a test notification verifying the channel works.\n\nSent at: {}",
            Utc::now().to_rfc3339()
        ),
    )
    .with_description("Channel configuration test");

    match channel.send(&message).await {
        Ok(()) => Ok(Json(serde_json::json!({
            "success": true,
            "message": format!("{} notification sent successfully", channel.name()),
        }))),
        Err(e) => Ok(Json(serde_json::json!({
            "success": false,
            "message": format!("{} notification failed: {e}", channel.name()),
        }))),
    }
}

fn missing(what: &str) -> ApiError {
    ApiError::Validation(format!("{what} is required"))
}
