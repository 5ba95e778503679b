use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{catalog::CatalogLoader, config::Config, handlers};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: reqwest::Client,
    pub loader: Arc<CatalogLoader>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http_client = reqwest::Client::new();
        let loader = Arc::new(CatalogLoader::new(
            http_client.clone(),
            config.catalog.clone(),
        ));
        Self {
            config: Arc::new(config),
            http_client,
            loader,
        }
    }
}

/// Start the quote service
///
/// Binds to the configured address and serves requests until a shutdown
/// signal arrives, then drains connections.
pub async fn start_server(config: Config) -> Result<()> {
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    let state = AppState::new(config);
    let app = create_router(state);

    info!("Starting PC quote service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/catalog", get(handlers::catalog::get_catalog))
        .route("/v1/quote", post(handlers::quote::compute_quote))
        .route("/v1/quote/document", post(handlers::document::render_document))
        .route("/v1/suggestions", post(handlers::suggestions::create_suggestions))
        .layer(TraceLayer::new_for_http())
        // The configurator UI runs in the browser on another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        return;
    }
    info!("Shutdown signal received, draining connections...");
}
