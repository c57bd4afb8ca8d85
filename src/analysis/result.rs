use serde::Serialize;

use super::AnalysisWarning;
use crate::nutrition::{round_to, NutrientAmounts};
use crate::parser::ParsedItem;

/// Display view of one parsed item with its nutrition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub raw: String,
    pub food_key: Option<String>,
    /// Rounded to 1 decimal
    pub grams: f64,
    /// Rounded to 2 decimals
    pub confidence: f64,
    /// Rounded to 2 decimals
    pub nutrition: NutrientAmounts,
}

impl ItemReport {
    pub(crate) fn new(item: &ParsedItem, nutrition: &NutrientAmounts) -> Self {
        Self {
            raw: item.raw.clone(),
            food_key: item.food_key.clone(),
            grams: round_to(item.grams, 1),
            confidence: round_to(item.confidence(), 2),
            nutrition: nutrition.rounded(2),
        }
    }
}

/// Final, immutable outcome of analyzing one meal description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub parsed_items: Vec<ItemReport>,
    /// Exact per-item sum, rounded to 2 decimals
    pub totals: NutrientAmounts,
    pub flags: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnalysisWarning>,
}
