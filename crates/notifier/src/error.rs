//! Error types for notification dispatch.

use thiserror::Error;

/// Errors that can occur when sending a notification.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// Network-level failure reaching the channel endpoint.
    #[error("notification request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The channel endpoint rejected the message.
    #[error("{channel} rejected the notification: {detail}")]
    Rejected {
        channel: &'static str,
        detail: String,
    },
}
