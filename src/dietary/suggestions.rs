use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::nutrition::Nutrient;

/// Suggestion text per nutrient for low and high intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionCatalog {
    pub low: HashMap<Nutrient, String>,
    pub high: HashMap<Nutrient, String>,
}

impl Default for SuggestionCatalog {
    fn default() -> Self {
        Self::empty()
            .with_low(
                Nutrient::Protein,
                "Add a protein source: egg, paneer, dal, or chicken.",
            )
            .with_low(
                Nutrient::Fiber,
                "Add vegetables or fruit (spinach, apple, banana).",
            )
            .with_low(
                Nutrient::VitaminC,
                "Add vitamin C rich food: orange, spinach, potato or fruits.",
            )
            .with_low(
                Nutrient::Calories,
                "Increase portion sizes or add an energy-dense item (nuts, paneer).",
            )
            .with_high(
                Nutrient::Fat,
                "Reduce fried items or oil; prefer grilled or steamed.",
            )
            .with_high(
                Nutrient::Calories,
                "Reduce portion or swap to lower-calorie alternatives.",
            )
    }
}

impl SuggestionCatalog {
    /// Catalog with no suggestions at all
    pub fn empty() -> Self {
        Self {
            low: HashMap::new(),
            high: HashMap::new(),
        }
    }

    pub fn with_low(mut self, nutrient: Nutrient, text: impl Into<String>) -> Self {
        self.low.insert(nutrient, text.into());
        self
    }

    pub fn with_high(mut self, nutrient: Nutrient, text: impl Into<String>) -> Self {
        self.high.insert(nutrient, text.into());
        self
    }

    pub fn low_for(&self, nutrient: Nutrient) -> Option<&str> {
        self.low.get(&nutrient).map(String::as_str)
    }

    pub fn high_for(&self, nutrient: Nutrient) -> Option<&str> {
        self.high.get(&nutrient).map(String::as_str)
    }
}
