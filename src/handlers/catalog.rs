use axum::{extract::State, Json};
use tracing::info;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::server::AppState;

/// Handle GET /v1/catalog
///
/// Every request re-fetches the full catalog from the source; there is no
/// caching layer, and a failure in any category fails the whole response.
pub async fn get_catalog(State(state): State<AppState>) -> Result<Json<Catalog>, AppError> {
    let catalog = state.loader.load().await?;
    info!(parts = catalog.len(), "catalog loaded");
    Ok(Json(catalog))
}
