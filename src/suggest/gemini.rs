use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::config::SuggestionsConfig;
use crate::error::AppError;
use crate::models::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::suggest::{build_prompt, response_schema, AiBuildOption};

/// Ask the suggestion service for build options.
///
/// Any transport or auth failure, non-success status, or unparseable payload
/// fails the whole call with `AiSuggestion`; there is no partial success at
/// this level and no retry.
///
/// Note: Model name is part of the URL path
pub async fn generate_suggestions(
    client: &Client,
    config: &SuggestionsConfig,
    catalog: &Catalog,
    customer_request: &str,
) -> Result<Vec<AiBuildOption>, AppError> {
    let request = GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: build_prompt(customer_request, catalog),
            }],
        }],
        generation_config: Some(GenerationConfig {
            temperature: None,
            max_output_tokens: None,
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(response_schema()),
        }),
    };

    // Gemini API format: /models/{model}:generateContent
    let url = format!("{}/models/{}:generateContent", config.base_url, config.model);

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(config.timeout_seconds))
        .query(&[("key", &config.api_key)])
        .json(&request)
        .send()
        .await
        .map_err(|err| {
            warn!(error = %err, "suggestion service request failed");
            AppError::AiSuggestion {
                detail: err.to_string(),
            }
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!(status = %status, "suggestion service returned non-success status");
        return Err(AppError::AiSuggestion {
            detail: format!("suggestion service returned {}: {}", status, error_text),
        });
    }

    let body: GenerateContentResponse =
        response.json().await.map_err(|err| AppError::AiSuggestion {
            detail: format!("unreadable suggestion response: {}", err),
        })?;

    if let Some(usage) = &body.usage_metadata {
        debug!(
            prompt_tokens = usage.prompt_token_count,
            total_tokens = usage.total_token_count,
            "suggestion call completed"
        );
    }

    let text = body.first_text().ok_or_else(|| AppError::AiSuggestion {
        detail: "suggestion response contained no candidates".to_string(),
    })?;

    let options: Vec<AiBuildOption> =
        serde_json::from_str(text).map_err(|err| AppError::AiSuggestion {
            detail: format!("unparseable suggestion payload: {}", err),
        })?;

    Ok(options)
}
