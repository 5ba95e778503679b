pub mod gemini;

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

use crate::build::BuildConfiguration;
use crate::catalog::{Catalog, Category};
use crate::pricing::PricingPrefs;

/// The three tiers the suggestion service is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildTier {
    Economy,
    Balanced,
    Performance,
}

/// One raw build option as returned by the suggestion service: a tier, a
/// justification and one part-name string per category key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiBuildOption {
    pub tier: BuildTier,
    pub justification: String,
    #[serde(flatten)]
    pub selections: HashMap<String, String>,
}

/// A raw option reconciled against the loaded catalog, ready for pricing
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedOption {
    pub tier: BuildTier,
    pub justification: String,
    pub build: BuildConfiguration,
    pub total_cost: f64,
    /// Fresh per-option preferences, editable before the user commits
    pub prefs: PricingPrefs,
}

/// Match each option's named selections back to catalog entries.
///
/// Lookup is exact string equality on the part name, in fixed category
/// order. Unmatched names leave the category unselected for that option;
/// this is not an error. Output order follows the service's order, and any
/// option count is tolerated.
pub fn reconcile(
    raw_options: Vec<AiBuildOption>,
    catalog: &Catalog,
    defaults: PricingPrefs,
) -> Vec<ProcessedOption> {
    raw_options
        .into_iter()
        .map(|option| {
            let mut build = BuildConfiguration::new();
            let mut total_cost = 0.0;

            for category in Category::ALL {
                let Some(name) = option.selections.get(category.key()) else {
                    continue;
                };
                match catalog.find(category, name) {
                    Some(part) => {
                        total_cost += part.price;
                        build.select(category, part.clone());
                    }
                    None => {
                        debug!(
                            category = %category,
                            name,
                            "suggested part not found in catalog, leaving unselected"
                        );
                    }
                }
            }

            ProcessedOption {
                tier: option.tier,
                justification: option.justification,
                build,
                total_cost,
                prefs: defaults,
            }
        })
        .collect()
}

/// Serialize the available parts per category for the prompt
pub fn parts_listing(catalog: &Catalog) -> String {
    Category::ALL
        .iter()
        .map(|&category| {
            let items = catalog
                .parts(category)
                .iter()
                .map(|p| format!("- {} (cost: {})", p.name, p.price))
                .collect::<Vec<_>>()
                .join("\n");
            format!("## {}\n{}", category.label(), items)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The full prompt: role, tier definitions, the customer's request and the
/// available parts with costs.
pub fn build_prompt(customer_request: &str, catalog: &Catalog) -> String {
    format!(
        "You are an expert PC building assistant. Analyze a customer's request and \
         create THREE build options using a list of available parts.\n\
         \n\
         The three options must be:\n\
         1. **Economy:** the cheapest option meeting the customer's minimum requirements.\n\
         2. **Balanced:** the best combination of performance and price, the recommended option.\n\
         3. **Performance:** the best possible option from the available parts, focused on performance.\n\
         \n\
         **Customer request:**\n\
         \"{customer_request}\"\n\
         \n\
         **Available parts (with costs):**\n\
         {parts}\n\
         \n\
         **Instructions:**\n\
         - Create exactly THREE options, one per tier (Economy, Balanced, Performance).\n\
         - For each option, select ONE part for EACH category from the parts list, \
           copying the part name exactly as written.\n\
         - For each option, provide a brief 'justification' explaining your choices.\n\
         - If the customer does not specify a part, pick a compatible option suited to the tier.\n\
         - Return your selection as an array of 3 JSON objects following the requested schema.",
        parts = parts_listing(catalog),
    )
}

/// Schema the service is asked to validate its JSON output against: an array
/// of objects with a tier, a justification and one part name per category.
pub fn response_schema() -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "tier".to_string(),
        json!({
            "type": "STRING",
            "description": "The tier of this build option. Must be one of: 'Economy', 'Balanced', 'Performance'.",
        }),
    );
    properties.insert(
        "justification".to_string(),
        json!({
            "type": "STRING",
            "description": "A brief explanation of why these parts were chosen for this tier.",
        }),
    );
    for category in Category::ALL {
        properties.insert(
            category.key().to_string(),
            json!({
                "type": "STRING",
                "description": format!("The exact name of the chosen {} from the list.", category.label()),
            }),
        );
    }

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
        },
    })
}
