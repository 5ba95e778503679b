pub mod catalog;
pub mod document;
pub mod quote;
pub mod suggestions;

use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Handle /health endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
