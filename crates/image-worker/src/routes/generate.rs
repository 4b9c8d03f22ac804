//! Image generation route.

use std::time::Duration;

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use inference::ImageGenerationRequest;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::routes::models::FAST_MODEL_ID;
use crate::state::AppState;

/// How long generated images stay cached.
const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Step count used by the fast model.
const FAST_MODEL_STEPS: u32 = 8;

/// Request to generate an image.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_resolution")]
    pub resolution: ResolutionParam,
}

/// Requested output resolution.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResolutionParam {
    pub width: u32,
    pub height: u32,
}

fn default_model() -> String {
    FAST_MODEL_ID.to_string()
}

fn default_resolution() -> ResolutionParam {
    ResolutionParam {
        width: 1024,
        height: 1024,
    }
}

/// Generation response.
#[derive(Serialize)]
pub struct GenerateResponse {
    /// Base64 `data:` URL of the generated image.
    pub image: String,
    /// Whether the image came from the cache.
    pub cached: bool,
}

/// Generate an image, serving repeated prompts from the cache.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::Validation("Prompt is required".to_string()));
    }

    let key = cache_key(&req.model, req.resolution, prompt);

    if let Some(image) = state.cache.get(&key).await? {
        return Ok(Json(GenerateResponse {
            image,
            cached: true,
        }));
    }

    let request = build_inference_request(&req.model, req.resolution, prompt);
    let image = state.inference.generate_image(request).await?;

    state.cache.put_with_ttl(&key, &image, CACHE_TTL).await?;
    info!(model = %req.model, "Generated and cached image");

    Ok(Json(GenerateResponse {
        image,
        cached: false,
    }))
}

/// Cache key: model + resolution + base64 of the prompt, so any parameter
/// change produces a distinct entry.
fn cache_key(model: &str, resolution: ResolutionParam, prompt: &str) -> String {
    format!(
        "{}_{}x{}_{}",
        model,
        resolution.width,
        resolution.height,
        BASE64.encode(prompt)
    )
}

/// Shape the inference request for the chosen model. The fast model takes a
/// step count at its fixed resolution; the others take explicit dimensions.
fn build_inference_request(
    model: &str,
    resolution: ResolutionParam,
    prompt: &str,
) -> ImageGenerationRequest {
    if model == FAST_MODEL_ID {
        ImageGenerationRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            width: None,
            height: None,
            num_steps: Some(FAST_MODEL_STEPS),
        }
    } else {
        ImageGenerationRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            width: Some(resolution.width),
            height: Some(resolution.height),
            num_steps: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RES: ResolutionParam = ResolutionParam {
        width: 1024,
        height: 1024,
    };

    #[test]
    fn cache_key_is_deterministic() {
        let a = cache_key("flux-1-schnell", RES, "a cat in a garden");
        let b = cache_key("flux-1-schnell", RES, "a cat in a garden");
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_varies_with_every_parameter() {
        let base = cache_key("flux-1-schnell", RES, "a cat");
        assert_ne!(base, cache_key("sdxl", RES, "a cat"));
        assert_ne!(
            base,
            cache_key(
                "flux-1-schnell",
                ResolutionParam {
                    width: 896,
                    height: 1152
                },
                "a cat"
            )
        );
        assert_ne!(base, cache_key("flux-1-schnell", RES, "a dog"));
    }

    #[test]
    fn fast_model_uses_steps_not_dimensions() {
        let request = build_inference_request(FAST_MODEL_ID, RES, "a cat");
        assert_eq!(request.num_steps, Some(FAST_MODEL_STEPS));
        assert_eq!(request.width, None);
        assert_eq!(request.height, None);
    }

    #[test]
    fn other_models_use_explicit_dimensions() {
        let request = build_inference_request("stable-diffusion-xl-base-1.0", RES, "a cat");
        assert_eq!(request.num_steps, None);
        assert_eq!(request.width, Some(1024));
        assert_eq!(request.height, Some(1024));
    }

    #[test]
    fn request_without_model_defaults_to_fast_model() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"prompt": "a cat"}"#).unwrap();
        assert_eq!(req.model, FAST_MODEL_ID);
        assert_eq!(req.resolution.width, 1024);
        assert_eq!(req.resolution.height, 1024);
    }
}
