use axum::{extract::State, response::Html, Json};
use serde::Deserialize;

use crate::build::BuildConfiguration;
use crate::pricing::PricingPrefs;
use crate::printable::render_quote_html;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub build: BuildConfiguration,
    #[serde(default)]
    pub prefs: Option<PricingPrefs>,
}

/// Handle POST /v1/quote/document
///
/// Returns the printable quote as a self-contained HTML page dated today.
pub async fn render_document(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Html<String> {
    let prefs = request
        .prefs
        .unwrap_or_else(|| PricingPrefs::from_config(&state.config.pricing));
    let emitted_on = chrono::Local::now().date_naive();

    Html(render_quote_html(
        &request.build,
        &prefs,
        &state.config.store,
        emitted_on,
    ))
}
