use serde::{Deserialize, Serialize};

use crate::build::BuildConfiguration;
use crate::catalog::{Category, Part};
use crate::config::PricingConfig;

/// Fixed number of installments the installment price is split into
pub const INSTALLMENT_COUNT: f64 = 12.0;

/// Markup and visibility knobs for one pricing context.
///
/// The main build and every AI-suggested option each carry their own
/// independent copy; editing one never affects another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPrefs {
    pub cash_markup_pct: f64,
    pub installment_markup_pct: f64,
    pub show_total_cost: bool,
    pub show_item_prices: bool,
    pub show_markup_editor: bool,
}

impl Default for PricingPrefs {
    fn default() -> Self {
        Self {
            cash_markup_pct: 30.0,
            installment_markup_pct: 13.0,
            show_total_cost: false,
            show_item_prices: true,
            show_markup_editor: false,
        }
    }
}

impl PricingPrefs {
    pub fn from_config(pricing: &PricingConfig) -> Self {
        Self {
            cash_markup_pct: pricing.cash_markup_pct,
            installment_markup_pct: pricing.installment_markup_pct,
            ..Self::default()
        }
    }
}

pub fn cash_price(total_cost: f64, cash_markup_pct: f64) -> f64 {
    total_cost * (1.0 + cash_markup_pct / 100.0)
}

pub fn installment_price(cash_price: f64, installment_markup_pct: f64) -> f64 {
    cash_price * (1.0 + installment_markup_pct / 100.0)
}

/// Per-installment amount at full precision; rounding is a display concern
pub fn per_installment(installment_price: f64) -> f64 {
    installment_price / INSTALLMENT_COUNT
}

/// Derived prices for a whole build under one set of preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub total_cost: f64,
    pub cash_price: f64,
    pub installment_price: f64,
    pub per_installment: f64,
}

impl QuoteSummary {
    pub fn compute(build: &BuildConfiguration, prefs: &PricingPrefs) -> Self {
        let total_cost = build.total_cost();
        let cash = cash_price(total_cost, prefs.cash_markup_pct);
        let installment = installment_price(cash, prefs.installment_markup_pct);
        Self {
            total_cost,
            cash_price: cash,
            installment_price: installment,
            per_installment: per_installment(installment),
        }
    }
}

/// One selected part with the two-stage markup applied to its own price.
///
/// Both markups are linear in price, so the itemized prices sum to the
/// aggregate quote; the markups are applied to each item's price with the
/// same formulas, never re-derived from a different base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemQuote {
    pub category: Category,
    pub name: String,
    pub cash_price: f64,
    pub installment_price: f64,
}

impl ItemQuote {
    pub fn compute(category: Category, part: &Part, prefs: &PricingPrefs) -> Self {
        let cash = cash_price(part.price, prefs.cash_markup_pct);
        Self {
            category,
            name: part.name.clone(),
            cash_price: cash,
            installment_price: installment_price(cash, prefs.installment_markup_pct),
        }
    }
}

/// Per-item breakdown in fixed category order
pub fn itemize(build: &BuildConfiguration, prefs: &PricingPrefs) -> Vec<ItemQuote> {
    build
        .selected()
        .map(|(category, part)| ItemQuote::compute(category, part, prefs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_build() -> BuildConfiguration {
        let mut build = BuildConfiguration::new();
        build.select(Category::Cpu, Part::new("CPU", 1000.0));
        build.select(Category::Gpu, Part::new("GPU", 2000.0));
        build
    }

    #[test]
    fn test_chained_markups() {
        // 3000 -> +30% = 3900 -> +13% = 4407 -> /12 = 367.25
        let build = sample_build();
        let summary = QuoteSummary::compute(&build, &PricingPrefs::default());

        assert_eq!(summary.total_cost, 3000.0);
        assert!((summary.cash_price - 3900.0).abs() < 1e-9);
        assert!((summary.installment_price - 4407.0).abs() < 1e-9);
        assert!((summary.per_installment - 367.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_build_quote_is_zero() {
        let summary = QuoteSummary::compute(&BuildConfiguration::new(), &PricingPrefs::default());
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.cash_price, 0.0);
        assert_eq!(summary.installment_price, 0.0);
        assert_eq!(summary.per_installment, 0.0);
    }

    #[test]
    fn test_itemized_prices_sum_to_aggregate() {
        let mut build = sample_build();
        build.select(Category::Ram, Part::new("RAM", 349.99));
        build.select(Category::Psu, Part::new("PSU", 512.37));

        let prefs = PricingPrefs {
            cash_markup_pct: 27.5,
            installment_markup_pct: 11.3,
            ..PricingPrefs::default()
        };
        let summary = QuoteSummary::compute(&build, &prefs);
        let items = itemize(&build, &prefs);

        let item_cash: f64 = items.iter().map(|i| i.cash_price).sum();
        let item_installment: f64 = items.iter().map(|i| i.installment_price).sum();

        assert!((item_cash - summary.cash_price).abs() < 1e-6);
        assert!((item_installment - summary.installment_price).abs() < 1e-6);
    }

    #[test]
    fn test_zero_markup_is_identity() {
        assert_eq!(cash_price(1500.0, 0.0), 1500.0);
        assert_eq!(installment_price(1500.0, 0.0), 1500.0);
    }

    #[test]
    fn test_prefs_from_config() {
        let prefs = PricingPrefs::from_config(&PricingConfig::default());
        assert_eq!(prefs.cash_markup_pct, 30.0);
        assert_eq!(prefs.installment_markup_pct, 13.0);
        assert!(prefs.show_item_prices);
        assert!(!prefs.show_total_cost);
    }
}
