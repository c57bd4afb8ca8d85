use std::sync::Arc;

use super::{ExactMatch, FuzzyMatch, MatchOutcome, MatchStrategy, SubstringMatch};
use crate::foods::FoodTable;

/// Ordered chain of match strategies over a shared food table
pub struct FoodMatcher {
    foods: Arc<FoodTable>,
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl FoodMatcher {
    /// Exact, then fuzzy at `fuzzy_cutoff`, then substring
    pub fn new(foods: Arc<FoodTable>, fuzzy_cutoff: f64) -> Self {
        let mut matcher = Self::empty(foods);
        matcher.push(ExactMatch);
        matcher.push(FuzzyMatch::new(fuzzy_cutoff));
        matcher.push(SubstringMatch);
        matcher
    }

    /// A matcher with no strategies; everything is unmatched until some are pushed
    pub fn empty(foods: Arc<FoodTable>) -> Self {
        Self {
            foods,
            strategies: Vec::new(),
        }
    }

    /// Append a strategy to the end of the chain
    pub fn push(&mut self, strategy: impl MatchStrategy + 'static) {
        self.strategies.push(Box::new(strategy));
    }

    /// Resolve a free-text token to a food key.
    ///
    /// The first strategy that finds an entry wins. Empty tokens never match.
    pub fn match_food(&self, token: &str) -> MatchOutcome {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return MatchOutcome::unmatched();
        }

        self.strategies
            .iter()
            .find_map(|s| {
                s.find(&token, &self.foods)
                    .map(|entry| MatchOutcome::matched(entry.key.as_str(), s.kind()))
            })
            .unwrap_or_else(MatchOutcome::unmatched)
    }

    pub fn foods(&self) -> &FoodTable {
        &self.foods
    }

    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }
}
