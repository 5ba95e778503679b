use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use reqwest::Client;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::catalog::{Catalog, Category, Part};
use crate::config::CatalogConfig;
use crate::error::AppError;

/// Fetches and parses the per-category part sheets.
///
/// Every `load()` re-fetches all categories; there is no caching layer. The
/// CSV decode step runs on a bounded pool of blocking workers; a slot is
/// acquired with a fixed-interval, fixed-ceiling poll so a saturated pool
/// fails the load instead of waiting forever.
pub struct CatalogLoader {
    client: Client,
    config: CatalogConfig,
    decode_slots: Arc<Semaphore>,
}

impl CatalogLoader {
    pub fn new(client: Client, config: CatalogConfig) -> Self {
        let decode_slots = Arc::new(Semaphore::new(config.parse_workers));
        Self {
            client,
            config,
            decode_slots,
        }
    }

    /// Load a fresh catalog. All categories are fetched concurrently; the
    /// first failure aborts the whole load and no partial catalog is returned.
    pub async fn load(&self) -> Result<Catalog, AppError> {
        let fetches = Category::ALL.iter().map(|&c| self.fetch_category(c));
        let lists = try_join_all(fetches).await?;

        let mut catalog = Catalog::new();
        for (category, parts) in Category::ALL.iter().zip(lists) {
            debug!(category = %category, parts = parts.len(), "category loaded");
            catalog.insert(*category, parts);
        }
        Ok(catalog)
    }

    async fn fetch_category(&self, category: Category) -> Result<Vec<Part>, AppError> {
        // Cache-busting nonce so repeated loads never hit a stale export.
        let nonce = chrono::Utc::now().timestamp_millis().to_string();

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("sheet", category.sheet_name()), ("_", nonce.as_str())])
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .send()
            .await
            .map_err(|err| {
                warn!(category = %category, error = %err, "catalog fetch failed");
                AppError::CatalogFetch { category }
            })?;

        if !response.status().is_success() {
            warn!(
                category = %category,
                status = %response.status(),
                "catalog endpoint returned non-success status"
            );
            return Err(AppError::CatalogFetch { category });
        }

        let body = response.text().await.map_err(|err| {
            warn!(category = %category, error = %err, "catalog body read failed");
            AppError::CatalogFetch { category }
        })?;

        let permit = self.acquire_decode_slot().await?;
        let parts = tokio::task::spawn_blocking(move || {
            let parts = parse_sheet(&body);
            drop(permit);
            parts
        })
        .await
        .map_err(|err| AppError::Internal(format!("decode task failed: {}", err)))?;

        Ok(parts)
    }

    /// Poll for a decode slot at a fixed interval with a bounded attempt
    /// ceiling. Exhausting the ceiling is terminal, not retried.
    async fn acquire_decode_slot(&self) -> Result<OwnedSemaphorePermit, AppError> {
        let mut attempts = 0u32;
        loop {
            match self.decode_slots.clone().try_acquire_owned() {
                Ok(permit) => return Ok(permit),
                Err(_) if attempts < self.config.parse_poll_max_attempts => {
                    attempts += 1;
                    tokio::time::sleep(Duration::from_millis(self.config.parse_poll_interval_ms))
                        .await;
                }
                Err(_) => return Err(AppError::ParseTimeout),
            }
        }
    }
}

/// Parse one sheet body into parts.
///
/// The first row is the header; column 0 is the part name and column 1 the
/// price, by position (the source's column naming is not trusted). A header
/// with fewer than two columns yields an empty list. Rows failing the minimal
/// validation are dropped silently.
fn parse_sheet(raw: &str) -> Vec<Part> {
    let cleaned = clean_rows(raw);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(cleaned.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            debug!(error = %err, "sheet header unreadable, treating as empty");
            return Vec::new();
        }
    };
    if headers.len() < 2 {
        debug!("sheet has fewer than two columns, treating as empty");
        return Vec::new();
    }

    let mut parts = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else {
            continue;
        };
        let name = record.get(0).unwrap_or("");
        let price = parse_price(record.get(1).unwrap_or(""));
        if !name.is_empty() && price > 0.0 {
            parts.push(Part::new(name, price));
        } else {
            debug!(name, "dropping row failing minimal validation");
        }
    }
    parts
}

/// Drop raw lines containing no ASCII alphanumeric character at all. The
/// source occasionally emits rows made only of empty quoted fields and
/// separators (`"","",""`), which a plain empty-line filter misses.
fn clean_rows(raw: &str) -> String {
    raw.lines()
        .filter(|line| line.bytes().any(|b| b.is_ascii_alphanumeric()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize a pt-BR price cell: strip the currency prefix, remove `.`
/// thousands separators, turn the `,` decimal into `.`, then parse.
/// Unparseable values resolve to zero and the row is dropped upstream.
pub(crate) fn parse_price(raw: &str) -> f64 {
    let cleaned = raw
        .trim()
        .trim_start_matches("R$")
        .trim()
        .replace('.', "")
        .replace(',', ".");
    cleaned.parse::<f64>().unwrap_or(0.0)
}
