//! Health check endpoint.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Health check endpoint.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}
