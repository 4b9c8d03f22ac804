//! Telegram bot API channel.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::channel::{Channel, Message};
use crate::error::NotifierError;

/// Sends messages through the Telegram bot API.
pub struct TelegramChannel {
    client: Client,
    bot_token: String,
    chat_id: String,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramChannel {
    /// Create a channel for the given bot token and chat id.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, message: &Message) -> Result<(), NotifierError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let text = format!("*{}*\n\n{}", message.title, message.body);

        debug!(chat_id = %self.chat_id, "Sending Telegram notification");

        let response: TelegramResponse = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }))
            .send()
            .await?
            .json()
            .await?;

        if response.ok {
            Ok(())
        } else {
            Err(NotifierError::Rejected {
                channel: "telegram",
                detail: response
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            })
        }
    }
}
