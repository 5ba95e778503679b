use anyhow::Result;
use colored::Colorize;
use tracing::info;

use pc_quoter::config::{self, Config};

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show() -> Result<()> {
    println!("{}", "Loading configuration...".yellow());

    let cfg = config::load_config()?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate() -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = config::load_config()?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Catalog endpoint: {}", cfg.catalog.base_url);
    println!("  Parse workers: {}", cfg.catalog.parse_workers);
    println!(
        "  Suggestions: {}",
        if cfg.suggestions.enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!(
        "  Markups: {}% cash, {}% installment",
        cfg.pricing.cash_markup_pct, cfg.pricing.installment_markup_pct
    );

    info!("Configuration validation successful");
    Ok(())
}

/// Mask the suggestion-service API key for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.suggestions.api_key = mask_api_key(&sanitized.suggestions.api_key);
    sanitized
}

/// Shows first 7 and last 4 characters with an ellipsis in between
fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    if key.len() <= 11 {
        // Too short to mask meaningfully
        return "***".to_string();
    }

    let prefix = &key[..7];
    let suffix = &key[key.len() - 4..];

    format!("{}...{}", prefix, suffix)
}
