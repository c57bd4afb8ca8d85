use serde::{Deserialize, Serialize};

use crate::nutrition::Nutrient;

/// Recommended daily intake per nutrient.
///
/// A `None` (or non-positive) target disables checks for that nutrient.
/// Fields missing from a config file keep their default values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RdiThresholds {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub vitamin_c: Option<f64>,
}

impl Default for RdiThresholds {
    fn default() -> Self {
        Self {
            calories: Some(2000.0),
            protein: Some(50.0),
            carbs: Some(275.0),
            fat: Some(70.0),
            fiber: Some(28.0),
            vitamin_c: Some(90.0),
        }
    }
}

impl RdiThresholds {
    /// Target for a nutrient, if it is defined and positive
    pub fn target(&self, nutrient: Nutrient) -> Option<f64> {
        let value = match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
            Nutrient::Fiber => self.fiber,
            Nutrient::VitaminC => self.vitamin_c,
        };
        value.filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Override a single target
    pub fn with_target(mut self, nutrient: Nutrient, target: Option<f64>) -> Self {
        let slot = match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Fiber => &mut self.fiber,
            Nutrient::VitaminC => &mut self.vitamin_c,
        };
        *slot = target;
        self
    }
}
