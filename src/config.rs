use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub catalog: CatalogConfig,
    pub suggestions: SuggestionsConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
        }
    }
}

/// Store identity printed in the quote document header
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub name: String,
    pub tax_id: String,
    pub branches: Vec<String>,
    pub contacts: Vec<String>,
    pub quote_validity_days: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "BeB Games Rio de Janeiro".to_string(),
            tax_id: "49.935.105/0002-02".to_string(),
            branches: vec![
                "Barra Shopping".to_string(),
                "Parkshopping Jacarepaguá".to_string(),
                "Parkshopping Campo Grande".to_string(),
            ],
            contacts: vec![
                "Loja Barra: 21 97194-6669".to_string(),
                "Loja Campo Grande: 21 98966-0026".to_string(),
                "Loja Jacarepaguá: 21 99569-1209".to_string(),
            ],
            quote_validity_days: 7,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// CSV export endpoint; the per-category sheet name and a cache-busting
    /// nonce are appended as query parameters.
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Fixed interval between decode-slot acquisition attempts
    pub parse_poll_interval_ms: u64,
    /// Attempt ceiling before the load fails with a parse timeout
    pub parse_poll_max_attempts: u32,
    /// Number of concurrent blocking CSV decode workers
    pub parse_workers: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://docs.google.com/spreadsheets/d/1Pail5ZHyDS_lU8-_Ida_O39cZWAbRk0pHl2O_bb8Ng4/gviz/tq?tqx=out:csv".to_string(),
            timeout_seconds: 30,
            parse_poll_interval_ms: 100,
            parse_poll_max_attempts: 50,
            parse_workers: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SuggestionsConfig {
    pub enabled: bool,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_seconds: 60,
        }
    }
}

/// Default markup percentages applied when a request carries no preferences
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    pub cash_markup_pct: f64,
    pub installment_markup_pct: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cash_markup_pct: 30.0,
            installment_markup_pct: 13.0,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("PC_QUOTER").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.catalog.base_url.is_empty() {
        anyhow::bail!("Catalog base URL must not be empty");
    }

    if cfg.catalog.parse_poll_max_attempts == 0 {
        anyhow::bail!("Catalog parse poll attempt ceiling must be at least 1");
    }

    if cfg.catalog.parse_workers == 0 {
        anyhow::bail!("Catalog parse worker count must be at least 1");
    }

    if cfg.pricing.cash_markup_pct < 0.0 || cfg.pricing.installment_markup_pct < 0.0 {
        anyhow::bail!("Markup percentages must not be negative");
    }

    if cfg.suggestions.enabled {
        if cfg.suggestions.api_key.is_empty() {
            anyhow::bail!("Suggestions are enabled but no API key is configured");
        }
        if cfg.suggestions.base_url.is_empty() {
            anyhow::bail!("Suggestions are enabled but the base URL is empty");
        }
        if cfg.suggestions.model.is_empty() {
            anyhow::bail!("Suggestions are enabled but no model is configured");
        }
    }

    Ok(())
}
