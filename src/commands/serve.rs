use anyhow::Result;
use tracing::info;

use pc_quoter::{config, server};

/// Execute the serve command
pub async fn execute() -> Result<()> {
    let cfg = config::load_config()?;
    info!(
        host = %cfg.server.host,
        port = cfg.server.port,
        suggestions_enabled = cfg.suggestions.enabled,
        "Configuration loaded"
    );

    server::start_server(cfg).await
}
