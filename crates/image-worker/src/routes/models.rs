//! Model catalog route.

use axum::Json;
use serde::Serialize;

/// A supported resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// A text-to-image model the worker accepts.
#[derive(Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub resolutions: Vec<Resolution>,
    pub features: Vec<&'static str>,
}

/// Model list response.
#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

/// Distilled fast model that renders at a fixed square resolution with a
/// small step count instead of explicit dimensions.
pub const FAST_MODEL_ID: &str = "flux-1-schnell";

const SQUARE: Resolution = Resolution {
    width: 1024,
    height: 1024,
};
const LANDSCAPE: Resolution = Resolution {
    width: 1152,
    height: 896,
};
const PORTRAIT: Resolution = Resolution {
    width: 896,
    height: 1152,
};

/// The static model catalog.
pub fn catalog() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: FAST_MODEL_ID,
            name: "Flux 1 Schnell",
            description: "Fast, high-quality generation",
            resolutions: vec![SQUARE],
            features: vec!["fast", "high quality"],
        },
        ModelInfo {
            id: "dreamshaper-8-lcm",
            name: "DreamShaper 8 LCM",
            description: "Artistic style generation",
            resolutions: vec![SQUARE, LANDSCAPE, PORTRAIT],
            features: vec!["artistic", "multiple sizes"],
        },
        ModelInfo {
            id: "stable-diffusion-xl-base-1.0",
            name: "Stable Diffusion XL",
            description: "High-resolution generation",
            resolutions: vec![SQUARE, LANDSCAPE, PORTRAIT],
            features: vec!["high resolution", "stable"],
        },
        ModelInfo {
            id: "stable-diffusion-xl-lightning",
            name: "SDXL Lightning",
            description: "Very fast generation",
            resolutions: vec![SQUARE, LANDSCAPE, PORTRAIT],
            features: vec!["very fast", "high quality"],
        },
    ]
}

/// Get the supported models as JSON.
pub async fn models_api() -> Json<ModelsResponse> {
    Json(ModelsResponse { models: catalog() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contains_fast_model() {
        let models = catalog();
        assert!(models.iter().any(|m| m.id == FAST_MODEL_ID));
    }

    #[test]
    fn fast_model_is_square_only() {
        let models = catalog();
        let fast = models.iter().find(|m| m.id == FAST_MODEL_ID).unwrap();
        assert_eq!(fast.resolutions, vec![SQUARE]);
    }
}
