//! Health check handlers.

use axum::response::Json;
use serde_json::{json, Value};

/// Root liveness probe.
pub async fn root() -> Json<Value> {
    Json(json!({"status": "IdeaOrigin backend running"}))
}

/// Health check endpoint.
pub async fn check() -> Json<Value> {
    Json(json!({"status": "healthy", "timestamp": chrono::Utc::now()}))
}
