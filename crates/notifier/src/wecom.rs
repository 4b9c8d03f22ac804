//! WeCom (enterprise WeChat) group webhook channel.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::channel::{Channel, Message};
use crate::error::NotifierError;

/// Sends plain-text messages to a WeCom group webhook.
pub struct WeComChannel {
    client: Client,
    webhook_url: String,
}

#[derive(Debug, Deserialize)]
struct WeComResponse {
    errcode: i64,
    #[serde(default)]
    errmsg: Option<String>,
}

impl WeComChannel {
    /// Create a channel for the given webhook URL.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    /// WeCom text messages have no Markdown rendering; strip the markers.
    fn strip_markdown(text: &str) -> String {
        text.replace("**", "")
            .replace('*', "")
            .replace("##", "")
            .replace('#', "")
            .replace('`', "")
    }
}

#[async_trait]
impl Channel for WeComChannel {
    fn name(&self) -> &'static str {
        "wecom"
    }

    async fn send(&self, message: &Message) -> Result<(), NotifierError> {
        let content = format!(
            "【{}】\n\n{}",
            message.title,
            Self::strip_markdown(&message.body)
        );

        debug!("Sending WeCom notification");

        let response: WeComResponse = self
            .client
            .post(&self.webhook_url)
            .json(&json!({
                "msgtype": "text",
                "text": { "content": content },
            }))
            .send()
            .await?
            .json()
            .await?;

        if response.errcode == 0 {
            Ok(())
        } else {
            Err(NotifierError::Rejected {
                channel: "wecom",
                detail: format!(
                    "errcode {}: {}",
                    response.errcode,
                    response.errmsg.unwrap_or_default()
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markdown_markers() {
        let input = "**bold** and *italic*, ## heading, `code`";
        assert_eq!(
            WeComChannel::strip_markdown(input),
            "bold and italic,  heading, code"
        );
    }
}
