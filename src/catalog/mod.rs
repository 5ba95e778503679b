pub mod loader;

pub use loader::CatalogLoader;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Part categories, in the order they appear in selections, prompts and the
/// printable quote. The declaration order is the fixed category order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cpu,
    Motherboard,
    Ram,
    Gpu,
    Storage,
    Psu,
    Case,
    Cooler,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Gpu,
        Category::Storage,
        Category::Psu,
        Category::Case,
        Category::Cooler,
    ];

    /// Stable identifying key, also the JSON wire name
    pub fn key(self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Ram => "ram",
            Category::Gpu => "gpu",
            Category::Storage => "storage",
            Category::Psu => "psu",
            Category::Case => "case",
            Category::Cooler => "cooler",
        }
    }

    /// Display label used in prompts and the printable quote
    pub fn label(self) -> &'static str {
        match self {
            Category::Cpu => "Processador (CPU)",
            Category::Motherboard => "Placa Mãe",
            Category::Ram => "Memória RAM",
            Category::Gpu => "Placa de Vídeo (GPU)",
            Category::Storage => "Armazenamento (SSD/HDD)",
            Category::Psu => "Fonte de Alimentação (PSU)",
            Category::Case => "Gabinete",
            Category::Cooler => "Cooler do Processador",
        }
    }

    /// Name of the source sheet holding this category's rows
    pub fn sheet_name(self) -> &'static str {
        match self {
            Category::Cpu => "Processador",
            Category::Motherboard => "Placa Mãe",
            Category::Ram => "Memoria RAM",
            Category::Gpu => "Placa de Video",
            Category::Storage => "Armazenamento",
            Category::Psu => "Fonte",
            Category::Case => "Gabinete",
            Category::Cooler => "Cooler",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A catalog entry. Invariant: non-empty name and strictly positive price,
/// enforced during ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub price: f64,
}

impl Part {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// The loaded catalog: per category, parts in source row order. Duplicate
/// names are kept as-is. Rebuilt from scratch on every load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    parts: BTreeMap<Category, Vec<Part>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, parts: Vec<Part>) {
        self.parts.insert(category, parts);
    }

    /// Parts for a category, empty if the category was never loaded
    pub fn parts(&self, category: Category) -> &[Part] {
        self.parts.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Exact-name lookup within a category
    pub fn find(&self, category: Category, name: &str) -> Option<&Part> {
        self.parts(category).iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.values().all(Vec::is_empty)
    }

    /// Total number of parts across all categories
    pub fn len(&self) -> usize {
        self.parts.values().map(Vec::len).sum()
    }
}
