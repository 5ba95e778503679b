use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::pricing::PricingPrefs;
use crate::server::AppState;
use crate::suggest::{self, ProcessedOption};

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    /// The customer's free-text request
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub options: Vec<ProcessedOption>,
}

/// Handle POST /v1/suggestions
///
/// Loads a fresh catalog, asks the suggestion service for three tiered
/// builds and reconciles them against the catalog. A suggestion failure
/// never affects an already-loaded catalog or the caller's current build.
pub async fn create_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    if !state.config.suggestions.enabled {
        return Err(AppError::ConfigError(
            "suggestions are not enabled".to_string(),
        ));
    }
    if request.prompt.trim().is_empty() {
        return Err(AppError::AiSuggestion {
            detail: "customer request must not be empty".to_string(),
        });
    }

    let catalog = state.loader.load().await?;

    let raw_options = suggest::gemini::generate_suggestions(
        &state.http_client,
        &state.config.suggestions,
        &catalog,
        &request.prompt,
    )
    .await?;

    let defaults = PricingPrefs::from_config(&state.config.pricing);
    let options = suggest::reconcile(raw_options, &catalog, defaults);
    info!(options = options.len(), "suggestions reconciled");

    Ok(Json(SuggestionResponse { options }))
}
