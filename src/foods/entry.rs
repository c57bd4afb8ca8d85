use serde::{Deserialize, Serialize};

use crate::nutrition::NutrientAmounts;

/// Serving size assumed when a table entry omits `serving_g`
pub const DEFAULT_SERVING_G: f64 = 100.0;

/// One row of the food reference table
#[derive(Debug, Clone, PartialEq)]
pub struct FoodEntry {
    /// Canonical food name, unique within the table
    pub key: String,
    /// Nutrient amounts per 100 g
    pub per_100g: NutrientAmounts,
    /// Default serving size in grams
    pub serving_g: f64,
}

/// On-disk shape of an entry: flat nutrient fields plus `serving_g`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FoodRecord {
    #[serde(flatten)]
    pub per_100g: NutrientAmounts,
    #[serde(default = "default_serving_g")]
    pub serving_g: f64,
}

fn default_serving_g() -> f64 {
    DEFAULT_SERVING_G
}

impl FoodEntry {
    pub fn new(key: impl Into<String>, per_100g: NutrientAmounts, serving_g: f64) -> Self {
        Self {
            key: key.into(),
            per_100g,
            serving_g,
        }
    }

    pub(crate) fn from_record(key: String, record: FoodRecord) -> Self {
        Self::new(key, record.per_100g, record.serving_g)
    }
}
