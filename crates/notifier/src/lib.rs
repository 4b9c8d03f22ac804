//! Notification channel dispatch for the Nimbus workers.
//!
//! The subscription worker sends expiry reminders through whichever channels
//! the operator has configured. Each channel (Telegram bot API, NotifyX,
//! WeCom webhook) implements the [`Channel`] trait; [`Notifier`] fans a
//! message out to every enabled channel and logs per-channel outcomes
//! instead of failing the whole dispatch.
//!
//! # Example
//!
//! ```no_run
//! use notifier::{Message, Notifier, NotifierConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = NotifierConfig {
//!         enabled: vec![notifier::ChannelKind::Telegram],
//!         telegram_bot_token: Some("bot-token".into()),
//!         telegram_chat_id: Some("chat-id".into()),
//!         ..Default::default()
//!     };
//!     let notifier = Notifier::new(config);
//!     let message = Message::new("Renewal due", "Your subscription expires in 3 days.");
//!     for outcome in notifier.broadcast(&message).await {
//!         println!("{}: {}", outcome.channel, outcome.success);
//!     }
//! }
//! ```

mod channel;
mod error;
mod notifyx;
mod telegram;
mod wecom;

pub use channel::{Channel, Message};
pub use error::NotifierError;
pub use notifyx::NotifyXChannel;
pub use telegram::TelegramChannel;
pub use wecom::WeComChannel;

// Re-export async_trait for downstream Channel implementations.
pub use async_trait::async_trait;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// The notification channels a deployment can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Telegram bot API.
    Telegram,
    /// NotifyX push service.
    Notifyx,
    /// WeCom (enterprise WeChat) group webhook.
    Wecom,
}

/// Channel configuration for a deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Channels to dispatch to.
    pub enabled: Vec<ChannelKind>,
    /// Telegram bot token.
    pub telegram_bot_token: Option<String>,
    /// Telegram chat id to send to.
    pub telegram_chat_id: Option<String>,
    /// NotifyX API key.
    pub notifyx_api_key: Option<String>,
    /// WeCom group webhook URL.
    pub wecom_webhook_url: Option<String>,
}

/// Outcome of one channel's dispatch attempt.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    /// Channel name.
    pub channel: String,
    /// Whether the channel accepted the message.
    pub success: bool,
    /// Error detail when it did not.
    pub detail: Option<String>,
}

/// Multi-channel notification dispatcher.
pub struct Notifier {
    channels: Vec<Box<dyn Channel>>,
}

impl Notifier {
    /// Build a notifier from configuration.
    ///
    /// Enabled channels missing their credentials are skipped with a warning
    /// rather than failing construction, so one misconfigured channel does
    /// not silence the others.
    pub fn new(config: NotifierConfig) -> Self {
        let mut channels: Vec<Box<dyn Channel>> = Vec::new();

        for kind in &config.enabled {
            match kind {
                ChannelKind::Telegram => {
                    match (&config.telegram_bot_token, &config.telegram_chat_id) {
                        (Some(token), Some(chat_id)) => {
                            channels.push(Box::new(TelegramChannel::new(token, chat_id)));
                        }
                        _ => warn!("Telegram channel enabled but bot token or chat id missing"),
                    }
                }
                ChannelKind::Notifyx => match &config.notifyx_api_key {
                    Some(key) => channels.push(Box::new(NotifyXChannel::new(key))),
                    None => warn!("NotifyX channel enabled but API key missing"),
                },
                ChannelKind::Wecom => match &config.wecom_webhook_url {
                    Some(url) => channels.push(Box::new(WeComChannel::new(url))),
                    None => warn!("WeCom channel enabled but webhook URL missing"),
                },
            }
        }

        Self { channels }
    }

    /// Number of usable channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Send a message through every usable channel.
    ///
    /// Failures are logged and reported per channel; one channel failing
    /// never aborts the rest.
    pub async fn broadcast(&self, message: &Message) -> Vec<DispatchOutcome> {
        if self.channels.is_empty() {
            warn!("No notification channels configured; dropping message");
            return Vec::new();
        }

        let mut outcomes = Vec::with_capacity(self.channels.len());

        for channel in &self.channels {
            match channel.send(message).await {
                Ok(()) => {
                    info!(channel = channel.name(), "Notification sent");
                    outcomes.push(DispatchOutcome {
                        channel: channel.name().to_string(),
                        success: true,
                        detail: None,
                    });
                }
                Err(e) => {
                    error!(channel = channel.name(), "Notification failed: {}", e);
                    outcomes.push(DispatchOutcome {
                        channel: channel.name().to_string(),
                        success: false,
                        detail: Some(e.to_string()),
                    });
                }
            }
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_channels_are_skipped() {
        let config = NotifierConfig {
            enabled: vec![ChannelKind::Telegram, ChannelKind::Notifyx, ChannelKind::Wecom],
            ..Default::default()
        };

        let notifier = Notifier::new(config);
        assert_eq!(notifier.channel_count(), 0);
    }

    #[test]
    fn configured_channels_are_built() {
        let config = NotifierConfig {
            enabled: vec![ChannelKind::Telegram, ChannelKind::Notifyx],
            telegram_bot_token: Some("token".into()),
            telegram_chat_id: Some("chat".into()),
            notifyx_api_key: Some("key".into()),
            wecom_webhook_url: Some("unused".into()),
        };

        // WeCom is configured but not enabled, so only two channels build.
        let notifier = Notifier::new(config);
        assert_eq!(notifier.channel_count(), 2);
    }

    #[test]
    fn channel_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChannelKind::Telegram).unwrap(),
            r#""telegram""#
        );
        let parsed: ChannelKind = serde_json::from_str(r#""notifyx""#).unwrap();
        assert_eq!(parsed, ChannelKind::Notifyx);
    }

    #[tokio::test]
    async fn broadcast_with_no_channels_returns_empty() {
        let notifier = Notifier::new(NotifierConfig::default());
        let outcomes = notifier
            .broadcast(&Message::new("title", "body"))
            .await;
        assert!(outcomes.is_empty());
    }
}
