//! Configuration for the inference client.

use std::env;

use crate::error::InferenceError;

/// Configuration for the inference client.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Inference API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Default chat model.
    pub chat_model: String,

    /// Default image generation model.
    pub image_model: String,

    /// Maximum tokens for chat responses.
    pub max_tokens: Option<u32>,

    /// Temperature for chat generation (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.inference.example".to_string(),
            api_key: String::new(),
            chat_model: "llama-3.1-8b-instruct".to_string(),
            image_model: "flux-1-schnell".to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.3),
        }
    }
}

impl InferenceConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `INFERENCE_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `INFERENCE_API_URL` - API base URL
    /// - `INFERENCE_CHAT_MODEL` - Default chat model (default: llama-3.1-8b-instruct)
    /// - `INFERENCE_IMAGE_MODEL` - Default image model (default: flux-1-schnell)
    /// - `INFERENCE_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `INFERENCE_TEMPERATURE` - Temperature (default: 0.3)
    pub fn from_env() -> Result<Self, InferenceError> {
        let api_key = env::var("INFERENCE_API_KEY")
            .map_err(|_| InferenceError::Configuration("INFERENCE_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        let api_url = env::var("INFERENCE_API_URL").unwrap_or(defaults.api_url);
        let chat_model = env::var("INFERENCE_CHAT_MODEL").unwrap_or(defaults.chat_model);
        let image_model = env::var("INFERENCE_IMAGE_MODEL").unwrap_or(defaults.image_model);

        let max_tokens = env::var("INFERENCE_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        let temperature = env::var("INFERENCE_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        Ok(Self {
            api_url,
            api_key,
            chat_model,
            image_model,
            max_tokens,
            temperature,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }
}

/// Builder for InferenceConfig.
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the default chat model.
    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.config.chat_model = model.into();
        self
    }

    /// Set the default image model.
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.config.image_model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InferenceConfig::default();

        assert!(config.api_key.is_empty());
        assert_eq!(config.chat_model, "llama-3.1-8b-instruct");
        assert_eq!(config.image_model, "flux-1-schnell");
        assert_eq!(config.max_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.3));
    }

    #[test]
    fn test_builder_all_options() {
        let config = InferenceConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.example")
            .chat_model("mistral-7b-instruct-v0.2")
            .image_model("stable-diffusion-xl-base-1.0")
            .max_tokens(512)
            .temperature(0.7)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.example");
        assert_eq!(config.chat_model, "mistral-7b-instruct-v0.2");
        assert_eq!(config.image_model, "stable-diffusion-xl-base-1.0");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.7));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_inference_vars() {
            std::env::remove_var("INFERENCE_API_KEY");
            std::env::remove_var("INFERENCE_API_URL");
            std::env::remove_var("INFERENCE_CHAT_MODEL");
            std::env::remove_var("INFERENCE_IMAGE_MODEL");
            std::env::remove_var("INFERENCE_MAX_TOKENS");
            std::env::remove_var("INFERENCE_TEMPERATURE");
        }

        // Missing API key should error.
        clear_all_inference_vars();
        let result = InferenceConfig::from_env();
        assert!(result.is_err());

        // Only API key set, defaults used.
        clear_all_inference_vars();
        std::env::set_var("INFERENCE_API_KEY", "test-env-key");

        let config = InferenceConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.chat_model, "llama-3.1-8b-instruct");
        assert_eq!(config.max_tokens, Some(1024));

        // All vars set.
        clear_all_inference_vars();
        std::env::set_var("INFERENCE_API_KEY", "full-test-key");
        std::env::set_var("INFERENCE_API_URL", "https://test.api.example");
        std::env::set_var("INFERENCE_CHAT_MODEL", "qwen1.5-14b-chat");
        std::env::set_var("INFERENCE_IMAGE_MODEL", "sdxl-lightning");
        std::env::set_var("INFERENCE_MAX_TOKENS", "2048");
        std::env::set_var("INFERENCE_TEMPERATURE", "0.9");

        let config = InferenceConfig::from_env().unwrap();
        assert_eq!(config.api_url, "https://test.api.example");
        assert_eq!(config.chat_model, "qwen1.5-14b-chat");
        assert_eq!(config.image_model, "sdxl-lightning");
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.9));

        clear_all_inference_vars();
    }
}
