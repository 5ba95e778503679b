use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::Category;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// A per-category catalog fetch failed; the whole load is aborted
    #[error("failed to load catalog data for category '{category}'")]
    CatalogFetch { category: Category },
    /// The CSV decode pool did not yield a slot within the bounded wait
    #[error("catalog decoder did not become available in time")]
    ParseTimeout,
    /// The suggestion service failed or returned unusable output
    #[error("suggestion service error: {detail}")]
    AiSuggestion { detail: String },
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),
    /// HTTP request error (preserves reqwest::Error for diagnostics)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::CatalogFetch { .. } => (StatusCode::BAD_GATEWAY, self.to_string()),
            Self::ParseTimeout => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
            Self::AiSuggestion { detail } => (StatusCode::BAD_GATEWAY, detail.clone()),
            Self::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::HttpRequest(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::CatalogFetch { .. } => "catalog_fetch_error",
        AppError::ParseTimeout => "catalog_parse_timeout",
        AppError::AiSuggestion { .. } => "ai_suggestion_error",
        AppError::ConfigError(_) => "config_error",
        AppError::HttpRequest(_) => "http_request_error",
        AppError::Internal(_) => "internal_error",
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::CatalogFetch {
            category: Category::Gpu,
        };
        assert_eq!(
            error.to_string(),
            "failed to load catalog data for category 'gpu'"
        );
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(error_type_name(&AppError::ParseTimeout), "catalog_parse_timeout");
        assert_eq!(
            error_type_name(&AppError::AiSuggestion {
                detail: "bad payload".to_string()
            }),
            "ai_suggestion_error"
        );
    }

    #[tokio::test]
    async fn test_error_response() {
        let error = AppError::CatalogFetch {
            category: Category::Cpu,
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_parse_timeout_response() {
        let response = AppError::ParseTimeout.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
