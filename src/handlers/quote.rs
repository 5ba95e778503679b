use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::build::BuildConfiguration;
use crate::pricing::{self, ItemQuote, PricingPrefs, QuoteSummary};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub build: BuildConfiguration,
    /// Missing preferences fall back to the configured markup defaults
    #[serde(default)]
    pub prefs: Option<PricingPrefs>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub summary: QuoteSummary,
    pub items: Vec<ItemQuote>,
    pub prefs: PricingPrefs,
}

/// Handle POST /v1/quote
///
/// Pure computation; never fails for a well-formed request.
pub async fn compute_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Json<QuoteResponse> {
    let prefs = request
        .prefs
        .unwrap_or_else(|| PricingPrefs::from_config(&state.config.pricing));

    let summary = QuoteSummary::compute(&request.build, &prefs);
    let items = pricing::itemize(&request.build, &prefs);

    Json(QuoteResponse {
        summary,
        items,
        prefs,
    })
}
