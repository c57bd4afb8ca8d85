mod error;
mod result;

#[cfg(test)]
mod tests;

pub use error::{AnalysisError, AnalysisWarning};
pub use result::{AnalysisResult, ItemReport};

use std::sync::Arc;

use crate::audit::{AuditSink, NoopAuditSink};
use crate::config::AnalyzerConfig;
use crate::dietary::DietaryAnalyzer;
use crate::foods::FoodTable;
use crate::matcher::FoodMatcher;
use crate::nutrition::{aggregate, nutrients_for, NutrientAmounts};
use crate::parser::MealParser;

/// Parses, totals and assesses free-text meals.
///
/// Holds only read-only state apart from the audit sink, so one instance
/// can serve any number of callers.
pub struct MealAnalyzer {
    foods: Arc<FoodTable>,
    parser: MealParser,
    dietary: DietaryAnalyzer,
    sink: Arc<dyn AuditSink>,
}

impl MealAnalyzer {
    /// Analyzer with default config and no audit logging
    pub fn new(foods: Arc<FoodTable>) -> Self {
        Self::with_config(foods, &AnalyzerConfig::default())
    }

    pub fn with_config(foods: Arc<FoodTable>, config: &AnalyzerConfig) -> Self {
        let matcher = FoodMatcher::new(Arc::clone(&foods), config.fuzzy_cutoff);
        let parser = MealParser::new(matcher)
            .unknown_unit_grams(config.unknown_unit_grams)
            .fallback_serving_g(config.fallback_serving_g);

        Self {
            foods,
            parser,
            dietary: DietaryAnalyzer::new(config.rdi, config.suggestions.clone()),
            sink: Arc::new(NoopAuditSink),
        }
    }

    /// Send every successful analysis to `sink`
    pub fn audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Analyze a meal description.
    ///
    /// Fails only on empty input. Unmatched foods and audit failures are
    /// reported as warnings on the result.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let items = self.parser.parse(text);
        let nutrition: Vec<NutrientAmounts> = items
            .iter()
            .map(|item| nutrients_for(&self.foods, item.food_key.as_deref(), item.grams))
            .collect();

        // Flags are judged on the totals the caller sees
        let totals = aggregate(&nutrition).rounded(2);
        let report = self.dietary.analyze(&totals);

        let mut warnings: Vec<AnalysisWarning> = items
            .iter()
            .filter(|item| !item.is_matched())
            .map(|item| {
                tracing::debug!(clause = %item.raw, "no food matched clause");
                AnalysisWarning::UnmatchedFood {
                    clause: item.raw.clone(),
                }
            })
            .collect();

        if let Err(err) = self.sink.record(text, &totals) {
            tracing::warn!(error = %err, "Failed to record meal analysis");
            warnings.push(AnalysisWarning::AuditSinkFailure {
                message: format!("{:#}", err),
            });
        }

        Ok(AnalysisResult {
            parsed_items: items
                .iter()
                .zip(&nutrition)
                .map(|(item, n)| ItemReport::new(item, n))
                .collect(),
            totals,
            flags: report.flags.iter().map(ToString::to_string).collect(),
            suggestions: report.suggestions,
            warnings,
        })
    }

    pub fn foods(&self) -> &FoodTable {
        &self.foods
    }
}
