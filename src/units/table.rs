use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::UNWEIGHTED_UNIT_WORDS;

/// A single unit alias resolved to its canonical name and weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitWeight {
    /// Canonical singular name (e.g. "egg" for "eggs")
    pub canonical: &'static str,
    /// Grams per one unit, always positive
    pub grams: f64,
}

// (alias, canonical, grams)
const UNIT_ALIASES: &[(&str, &str, f64)] = &[
    ("g", "g", 1.0),
    ("gram", "g", 1.0),
    ("grams", "g", 1.0),
    ("kg", "kg", 1000.0),
    ("kilogram", "kg", 1000.0),
    ("kilograms", "kg", 1000.0),
    ("cup", "cup", 240.0),
    ("cups", "cup", 240.0),
    ("tbsp", "tbsp", 15.0),
    ("tablespoon", "tbsp", 15.0),
    ("tablespoons", "tbsp", 15.0),
    ("tsp", "tsp", 5.0),
    ("teaspoon", "tsp", 5.0),
    ("teaspoons", "tsp", 5.0),
    ("slice", "slice", 30.0),
    ("slices", "slice", 30.0),
    ("serving", "serving", 100.0),
    ("servings", "serving", 100.0),
    ("piece", "piece", 80.0),
    ("pieces", "piece", 80.0),
    ("egg", "egg", 50.0),
    ("eggs", "egg", 50.0),
];

static DEFAULT_TABLE: Lazy<UnitTable> = Lazy::new(UnitTable::build);

/// Static alias -> grams mapping for household and count-like units
#[derive(Debug)]
pub struct UnitTable {
    weights: HashMap<&'static str, UnitWeight>,
    /// Every word the parser treats as a unit, longest first
    words: Vec<&'static str>,
}

impl UnitTable {
    /// Shared process-wide table
    pub fn global() -> &'static UnitTable {
        &DEFAULT_TABLE
    }

    fn build() -> Self {
        let weights = UNIT_ALIASES
            .iter()
            .map(|&(alias, canonical, grams)| (alias, UnitWeight { canonical, grams }))
            .collect();

        let mut words: Vec<&'static str> = UNIT_ALIASES
            .iter()
            .map(|&(alias, _, _)| alias)
            .chain(UNWEIGHTED_UNIT_WORDS.iter().copied())
            .collect();
        // Longest first so "grams" wins over "g" in an alternation
        words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        words.dedup();

        Self { weights, words }
    }

    /// Look up an alias, ignoring case
    pub fn lookup(&self, alias: &str) -> Option<UnitWeight> {
        self.weights.get(alias.trim().to_lowercase().as_str()).copied()
    }

    /// Grams per unit for an alias, or `None` when the alias has no weight
    pub fn grams_for(&self, alias: &str) -> Option<f64> {
        self.lookup(alias).map(|w| w.grams)
    }

    /// All recognized unit words, longest first
    pub fn unit_words(&self) -> &[&'static str] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
