//! Inference API client.

use reqwest::Client;
use tracing::{debug, warn};

use crate::api_types::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ImageGenerationRequest, ImageGenerationResponse,
};
use crate::config::InferenceConfig;
use crate::error::InferenceError;

/// Client for an OpenAI-compatible inference API.
///
/// One client is shared per worker process; reqwest pools connections
/// internally, so cloning the worker state clones cheap handles.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    config: InferenceConfig,
}

impl InferenceClient {
    /// Create a new client with the given configuration.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder().build().map_err(|e| {
            InferenceError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`InferenceConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, InferenceError> {
        Self::new(InferenceConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Request a chat completion and return the assistant's text.
    ///
    /// `model`, `max_tokens` and `temperature` override the configured
    /// defaults when set.
    pub async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        model: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<String, InferenceError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: model.unwrap_or(&self.config.chat_model).to_string(),
            messages,
            max_tokens: max_tokens.or(self.config.max_tokens),
            temperature: temperature.or(self.config.temperature),
        };

        debug!(model = %request.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let completion: ChatCompletionResponse = response.json().await?;

        let text = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or(InferenceError::EmptyResponse)?;

        if let Some(usage) = completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion finished"
            );
        }

        Ok(text)
    }

    /// Generate an image and return it as a base64 `data:` URL.
    pub async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<String, InferenceError> {
        let url = format!("{}/v1/images/generations", self.config.api_url);

        debug!(model = %request.model, "Sending image generation request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let generated: ImageGenerationResponse = response.json().await?;

        let image = generated
            .data
            .into_iter()
            .next()
            .ok_or(InferenceError::EmptyResponse)?;

        Ok(format!("data:image/png;base64,{}", image.b64_json))
    }

    /// Map a non-success response to [`InferenceError::Api`], preferring the
    /// structured error message when the body parses as one.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, InferenceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&error_text) {
            Ok(body) => body.error.message,
            Err(_) => {
                warn!(status = status.as_u16(), "Unstructured inference API error");
                error_text
            }
        };

        Err(InferenceError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
