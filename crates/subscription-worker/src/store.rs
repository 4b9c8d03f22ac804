//! KV-backed storage for subscriptions and notification settings.

use chrono::Utc;
use kv_store::{Namespace, Result};
use notifier::{ChannelKind, NotifierConfig};
use serde::{Deserialize, Serialize};

use crate::models::Subscription;

/// KV key of the notification settings.
const SETTINGS_KEY: &str = "config";

const SUBSCRIPTION_PREFIX: &str = "subscription:";

/// Operator-editable notification settings, stored in the KV store.
///
/// Credentials for the service itself (admin login, token secret) live in
/// the environment, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default)]
    pub enabled_channels: Vec<ChannelKind>,
    #[serde(default)]
    pub telegram_bot_token: Option<String>,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
    #[serde(default)]
    pub notifyx_api_key: Option<String>,
    #[serde(default)]
    pub wecom_webhook_url: Option<String>,
}

impl NotificationSettings {
    /// Convert to the notifier crate's configuration.
    pub fn to_notifier_config(&self) -> NotifierConfig {
        NotifierConfig {
            enabled: self.enabled_channels.clone(),
            telegram_bot_token: self.telegram_bot_token.clone(),
            telegram_chat_id: self.telegram_chat_id.clone(),
            notifyx_api_key: self.notifyx_api_key.clone(),
            wecom_webhook_url: self.wecom_webhook_url.clone(),
        }
    }
}

fn storage_key(id: &str) -> String {
    format!("{SUBSCRIPTION_PREFIX}{id}")
}

/// Load the stored notification settings, defaulting to everything off.
pub async fn get_settings(ns: &Namespace) -> Result<NotificationSettings> {
    Ok(ns.get_json(SETTINGS_KEY).await?.unwrap_or_default())
}

/// Replace the stored notification settings.
pub async fn save_settings(ns: &Namespace, settings: &NotificationSettings) -> Result<()> {
    ns.put_json(SETTINGS_KEY, settings).await
}

/// List all subscriptions.
pub async fn list_subscriptions(ns: &Namespace) -> Result<Vec<Subscription>> {
    let mut subscriptions = Vec::new();
    for entry in ns.list(SUBSCRIPTION_PREFIX).await? {
        subscriptions.push(serde_json::from_str(&entry.value)?);
    }
    Ok(subscriptions)
}

/// Get one subscription by id.
pub async fn get_subscription(ns: &Namespace, id: &str) -> Result<Option<Subscription>> {
    Ok(ns.get_json(&storage_key(id)).await?)
}

/// Store a subscription, stamping timestamps.
pub async fn save_subscription(ns: &Namespace, subscription: &mut Subscription) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    if subscription.created_at.is_none() {
        subscription.created_at = Some(now.clone());
    }
    subscription.updated_at = Some(now);

    ns.put_json(&storage_key(&subscription.id), subscription)
        .await
}

/// Delete a subscription by id.
pub async fn delete_subscription(ns: &Namespace, id: &str) -> Result<()> {
    ns.delete(&storage_key(id)).await
}
