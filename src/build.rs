use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Category, Part};

/// A partial selection of at most one part per category.
///
/// Updates are atomic: a category is either set to exactly one part or
/// removed entirely, never left half-updated. Iteration follows the fixed
/// category order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildConfiguration {
    selections: BTreeMap<Category, Part>,
}

impl BuildConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, category: Category, part: Part) {
        self.selections.insert(category, part);
    }

    pub fn clear(&mut self, category: Category) {
        self.selections.remove(&category);
    }

    /// Set-or-remove in one call, mirroring a selector that can be unset
    pub fn set(&mut self, category: Category, part: Option<Part>) {
        match part {
            Some(part) => self.select(category, part),
            None => self.clear(category),
        }
    }

    pub fn reset(&mut self) {
        self.selections.clear();
    }

    pub fn get(&self, category: Category) -> Option<&Part> {
        self.selections.get(&category)
    }

    /// Selected parts in fixed category order
    pub fn selected(&self) -> impl Iterator<Item = (Category, &Part)> {
        self.selections.iter().map(|(c, p)| (*c, p))
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Sum of the selected parts' prices; 0 for an empty build
    pub fn total_cost(&self) -> f64 {
        self.selections.values().map(|p| p.price).sum()
    }
}
