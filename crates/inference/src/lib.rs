//! HTTP client for an OpenAI-compatible AI inference API.
//!
//! The workers proxy user requests to a hosted inference service: the
//! summary worker sends chat completions, the image worker sends image
//! generation requests. This crate owns the wire types, the error mapping,
//! and the configuration for that service.
//!
//! # Example
//!
//! ```no_run
//! use inference::{ChatMessage, InferenceClient, InferenceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), inference::InferenceError> {
//!     let client = InferenceClient::new(InferenceConfig::from_env()?)?;
//!     let reply = client
//!         .chat(vec![ChatMessage::user("Summarize: ...")], None, None, None)
//!         .await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;
mod error;

pub use api_types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, GeneratedImage,
    ImageGenerationRequest, ImageGenerationResponse, ResponseMessage, Usage,
};
pub use client::InferenceClient;
pub use config::{InferenceConfig, InferenceConfigBuilder};
pub use error::InferenceError;
