//! Model catalog route.

use axum::Json;
use serde::Serialize;

/// A chat model the worker accepts for summarization.
#[derive(Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "maxLength")]
    pub max_length: u32,
    pub styles: Vec<&'static str>,
    pub languages: Vec<&'static str>,
}

/// Model list response.
#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

const STYLES: [&str; 5] = ["concise", "detailed", "bullet", "academic", "casual"];
const LANGUAGES: [&str; 3] = ["en-US", "zh-CN", "ja-JP"];

/// The static model catalog.
pub fn catalog() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: "llama-2-7b-chat-int8",
            name: "Llama 2 7B Chat",
            description: "Fast, accurate summarization",
            max_length: 500,
            styles: STYLES.to_vec(),
            languages: LANGUAGES.to_vec(),
        },
        ModelInfo {
            id: "llama-3.1-8b-instruct",
            name: "Llama 3.1 8B Instruct",
            description: "High-quality summarization with strong comprehension",
            max_length: 1000,
            styles: STYLES.to_vec(),
            languages: LANGUAGES.to_vec(),
        },
        ModelInfo {
            id: "mistral-7b-instruct-v0.2",
            name: "Mistral 7B Instruct",
            description: "Balanced speed and quality",
            max_length: 800,
            styles: STYLES.to_vec(),
            languages: LANGUAGES.to_vec(),
        },
    ]
}

/// Get the supported models as JSON.
pub async fn models_api() -> Json<ModelsResponse> {
    Json(ModelsResponse { models: catalog() })
}
