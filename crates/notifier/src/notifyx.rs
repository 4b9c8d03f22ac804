//! NotifyX push channel.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::channel::{Channel, Message};
use crate::error::NotifierError;

/// Sends messages through the NotifyX push service.
pub struct NotifyXChannel {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct NotifyXResponse {
    status: String,
}

impl NotifyXChannel {
    /// Create a channel for the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Channel for NotifyXChannel {
    fn name(&self) -> &'static str {
        "notifyx"
    }

    async fn send(&self, message: &Message) -> Result<(), NotifierError> {
        let url = format!("https://www.notifyx.cn/api/v1/send/{}", self.api_key);
        let content = format!("## {}\n\n{}", message.title, message.body);

        debug!("Sending NotifyX notification");

        let response: NotifyXResponse = self
            .client
            .post(&url)
            .json(&json!({
                "title": message.title,
                "content": content,
                "description": message.description.as_deref().unwrap_or(""),
            }))
            .send()
            .await?
            .json()
            .await?;

        if response.status == "queued" {
            Ok(())
        } else {
            Err(NotifierError::Rejected {
                channel: "notifyx",
                detail: format!("unexpected status: {}", response.status),
            })
        }
    }
}
