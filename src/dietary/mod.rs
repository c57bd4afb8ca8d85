mod rdi;
mod suggestions;

#[cfg(test)]
mod tests;

pub use rdi::RdiThresholds;
pub use suggestions::SuggestionCatalog;

use std::fmt;

use crate::nutrition::{Nutrient, NutrientAmounts};

/// Below this share of the RDI a nutrient is flagged low
pub const LOW_PERCENT: f64 = 80.0;
/// Above this share of the RDI a nutrient is flagged high
pub const HIGH_PERCENT: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagLevel {
    Low,
    High,
}

/// A nutrient outside the 80%..=120% RDI band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DietaryFlag {
    pub nutrient: Nutrient,
    pub level: FlagLevel,
    /// Share of the RDI, unrounded
    pub percent: f64,
}

impl fmt::Display for DietaryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            FlagLevel::Low => "Low",
            FlagLevel::High => "High",
        };
        write!(f, "{} {} ({:.1}% of RDI)", level, self.nutrient, self.percent)
    }
}

/// Flags in nutrient order plus deduplicated suggestions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DietaryReport {
    pub flags: Vec<DietaryFlag>,
    pub suggestions: Vec<String>,
}

/// Compares meal totals against RDI targets
#[derive(Debug, Clone, Default)]
pub struct DietaryAnalyzer {
    rdi: RdiThresholds,
    catalog: SuggestionCatalog,
}

impl DietaryAnalyzer {
    pub fn new(rdi: RdiThresholds, catalog: SuggestionCatalog) -> Self {
        Self { rdi, catalog }
    }

    /// Flag each nutrient strictly below 80% or strictly above 120% of its target.
    ///
    /// Suggestions keep first-occurrence order and appear once even when
    /// several nutrients map to the same text.
    pub fn analyze(&self, totals: &NutrientAmounts) -> DietaryReport {
        let mut report = DietaryReport::default();

        for (nutrient, amount) in totals.iter() {
            let Some(target) = self.rdi.target(nutrient) else {
                continue;
            };
            let percent = amount * 100.0 / target;

            let (level, suggestion) = if percent < LOW_PERCENT {
                (FlagLevel::Low, self.catalog.low_for(nutrient))
            } else if percent > HIGH_PERCENT {
                (FlagLevel::High, self.catalog.high_for(nutrient))
            } else {
                continue;
            };

            report.flags.push(DietaryFlag {
                nutrient,
                level,
                percent,
            });

            if let Some(text) = suggestion {
                if !report.suggestions.iter().any(|s| s == text) {
                    report.suggestions.push(text.to_string());
                }
            }
        }

        report
    }

    pub fn rdi(&self) -> &RdiThresholds {
        &self.rdi
    }
}
