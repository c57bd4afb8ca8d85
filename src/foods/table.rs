use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

use super::entry::FoodRecord;
use super::{FoodEntry, FoodTableError};

const BUILTIN_FOODS: &str = include_str!("../../data/foods.json");

/// Immutable, validated food reference table.
///
/// Entries keep the order they were loaded in; matcher tie-breaks rely on it.
#[derive(Debug, Clone)]
pub struct FoodTable {
    entries: Vec<FoodEntry>,
    /// Lowercased key -> position in `entries`
    index: HashMap<String, usize>,
}

impl FoodTable {
    /// Build a table from entries, validating each one
    pub fn from_entries(entries: Vec<FoodEntry>) -> Result<Self, FoodTableError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (pos, entry) in entries.iter().enumerate() {
            validate_entry(entry)?;
            let folded = entry.key.to_lowercase();
            if index.insert(folded, pos).is_some() {
                return Err(FoodTableError::DuplicateKey(entry.key.clone()));
            }
        }

        Ok(Self { entries, index })
    }

    /// Parse a JSON object of `name -> {calories, protein, ..., serving_g}`
    pub fn from_json_str(json: &str) -> Result<Self, FoodTableError> {
        let object: Map<String, Value> = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(object.len());

        for (key, value) in object {
            let record: FoodRecord = serde_json::from_value(value)?;
            entries.push(FoodEntry::from_record(key, record));
        }

        Self::from_entries(entries)
    }

    /// Load a table from a JSON file on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FoodTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FoodTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The table bundled with the crate
    pub fn builtin() -> Result<Self, FoodTableError> {
        Self::from_json_str(BUILTIN_FOODS)
    }

    /// Look up an entry by key, ignoring case
    pub fn get(&self, key: &str) -> Option<&FoodEntry> {
        self.index
            .get(key.to_lowercase().as_str())
            .map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Default serving size for a key
    pub fn serving_g(&self, key: &str) -> Option<f64> {
        self.get(key).map(|e| e.serving_g)
    }

    /// Entries in load order
    pub fn iter(&self) -> impl Iterator<Item = &FoodEntry> {
        self.entries.iter()
    }

    /// Keys in load order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_entry(entry: &FoodEntry) -> Result<(), FoodTableError> {
    if entry.key.trim().is_empty() {
        return Err(FoodTableError::EmptyKey);
    }

    for (nutrient, value) in entry.per_100g.iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(FoodTableError::InvalidValue {
                key: entry.key.clone(),
                field: nutrient.name(),
                value,
            });
        }
    }

    if !entry.serving_g.is_finite() || entry.serving_g <= 0.0 {
        return Err(FoodTableError::InvalidValue {
            key: entry.key.clone(),
            field: "serving_g",
            value: entry.serving_g,
        });
    }

    Ok(())
}
