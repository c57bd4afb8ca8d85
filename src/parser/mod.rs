mod clause;
mod item;
mod quantity;


pub use clause::{split_clauses, RawClause};
pub use item::{ClauseShape, ParsedItem};

use quantity::Extracted;

use crate::foods::DEFAULT_SERVING_G;
use crate::matcher::{FoodMatcher, MatchOutcome};
use crate::units::{UnitTable, DEFAULT_UNKNOWN_UNIT_GRAMS};

/// Turns meal text into one [`ParsedItem`] per clause
pub struct MealParser {
    matcher: FoodMatcher,
    units: &'static UnitTable,
    /// Grams per unit for recognized unit words without a fixed weight
    unknown_unit_grams: f64,
    /// Serving size used when the food did not match
    fallback_serving_g: f64,
}

impl MealParser {
    pub fn new(matcher: FoodMatcher) -> Self {
        Self {
            matcher,
            units: UnitTable::global(),
            unknown_unit_grams: DEFAULT_UNKNOWN_UNIT_GRAMS,
            fallback_serving_g: DEFAULT_SERVING_G,
        }
    }

    /// Set grams per unit for unit words with no table weight
    pub fn unknown_unit_grams(mut self, grams: f64) -> Self {
        self.unknown_unit_grams = grams;
        self
    }

    /// Set the serving size used for unmatched foods
    pub fn fallback_serving_g(mut self, grams: f64) -> Self {
        self.fallback_serving_g = grams;
        self
    }

    /// Parse every clause of `text`.
    ///
    /// Clauses are never dropped: an unmatched clause still gets a weight
    /// from the fallback serving and a `None` food key.
    pub fn parse(&self, text: &str) -> Vec<ParsedItem> {
        split_clauses(text)
            .iter()
            .map(|clause| self.parse_clause(clause))
            .collect()
    }

    /// Resolve a single clause
    pub fn parse_clause(&self, clause: &RawClause) -> ParsedItem {
        let item = match quantity::extract(&clause.text) {
            Extracted::Grams { grams, food_text } => {
                let outcome = self.matcher.match_food(&food_text);
                build(clause, food_text, outcome, grams, ClauseShape::ExplicitGrams)
            }
            Extracted::Counted {
                quantity,
                unit,
                food_text,
            } => {
                let outcome = self.matcher.match_food(&food_text);
                let serving = self.serving_for(&outcome);

                let (grams, shape) = match (quantity, unit.as_deref()) {
                    (Some(n), Some(unit)) => (
                        n * self.units.grams_for(unit).unwrap_or(self.unknown_unit_grams),
                        ClauseShape::Quantified,
                    ),
                    (Some(n), None) => (n * serving, ClauseShape::Quantified),
                    (None, Some(_)) => (serving, ClauseShape::Quantified),
                    (None, None) => (serving, ClauseShape::BareFood),
                };

                // Overflow from absurd counts falls back to one serving
                let grams = if grams.is_finite() && grams > 0.0 {
                    grams
                } else {
                    serving
                };

                build(clause, food_text, outcome, grams, shape)
            }
        };

        tracing::debug!(
            clause = %item.raw,
            food_key = ?item.food_key,
            grams = item.grams,
            kind = ?item.match_kind,
            "parsed clause"
        );

        item
    }

    pub fn matcher(&self) -> &FoodMatcher {
        &self.matcher
    }

    fn serving_for(&self, outcome: &MatchOutcome) -> f64 {
        outcome
            .food_key
            .as_deref()
            .and_then(|key| self.matcher.foods().serving_g(key))
            .unwrap_or(self.fallback_serving_g)
    }
}

fn build(
    clause: &RawClause,
    food_text: String,
    outcome: MatchOutcome,
    grams: f64,
    shape: ClauseShape,
) -> ParsedItem {
    ParsedItem {
        raw: clause.text.clone(),
        food_text,
        food_key: outcome.food_key,
        grams,
        match_kind: outcome.kind,
        shape,
    }
}
