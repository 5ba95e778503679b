use anyhow::Result;
use colored::Colorize;

use pc_quoter::catalog::{CatalogLoader, Category};
use pc_quoter::config;
use pc_quoter::printable::format_brl;

/// Execute the catalog command
///
/// Fetches the full catalog once and prints it, either as a per-category
/// table or as raw JSON.
pub async fn execute(json: bool) -> Result<()> {
    let cfg = config::load_config()?;

    println!("{}", "Loading catalog...".yellow());
    let loader = CatalogLoader::new(reqwest::Client::new(), cfg.catalog.clone());
    let catalog = loader.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for category in Category::ALL {
        let parts = catalog.parts(category);
        println!();
        println!(
            "{} {}",
            category.label().green().bold(),
            format!("({} parts)", parts.len()).dimmed()
        );
        for part in parts {
            println!("  {:<60} {:>14}", part.name, format_brl(part.price));
        }
    }

    println!();
    println!("{}", format!("Total: {} parts", catalog.len()).bold());
    Ok(())
}
