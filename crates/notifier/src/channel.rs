//! The channel trait and message type.

use async_trait::async_trait;

use crate::error::NotifierError;

/// A notification to dispatch.
///
/// The body is written in Markdown; channels that cannot render Markdown
/// strip it before sending.
#[derive(Debug, Clone)]
pub struct Message {
    /// Short title.
    pub title: String,
    /// Message body (Markdown).
    pub body: String,
    /// Optional one-line description, used by channels that support it.
    pub description: Option<String>,
}

impl Message {
    /// Create a message with a title and body.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A notification delivery channel.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel name used in logs and dispatch outcomes.
    fn name(&self) -> &'static str;

    /// Deliver the message.
    async fn send(&self, message: &Message) -> Result<(), NotifierError>;
}
