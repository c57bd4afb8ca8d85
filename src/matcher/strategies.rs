use super::{similarity_ratio, MatchKind, MatchStrategy};
use crate::foods::{FoodEntry, FoodTable};

/// Minimum similarity ratio for a fuzzy match
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.6;

/// Case-insensitive equality with a table key
pub struct ExactMatch;

impl MatchStrategy for ExactMatch {
    fn kind(&self) -> MatchKind {
        MatchKind::Exact
    }

    fn find<'t>(&self, token: &str, foods: &'t FoodTable) -> Option<&'t FoodEntry> {
        foods.get(token)
    }
}

/// Best similarity ratio over all keys, accepted at or above `cutoff`.
///
/// Equal top scores resolve to the earliest key in table order.
pub struct FuzzyMatch {
    cutoff: f64,
}

impl FuzzyMatch {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }
}

impl Default for FuzzyMatch {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_CUTOFF)
    }
}

impl MatchStrategy for FuzzyMatch {
    fn kind(&self) -> MatchKind {
        MatchKind::Fuzzy
    }

    fn find<'t>(&self, token: &str, foods: &'t FoodTable) -> Option<&'t FoodEntry> {
        let mut best: Option<(&FoodEntry, f64)> = None;

        for entry in foods.iter() {
            let score = similarity_ratio(&entry.key.to_lowercase(), token);
            // Strict comparison keeps the first of equal scores
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((entry, score));
            }
        }

        best.filter(|&(_, score)| score >= self.cutoff)
            .map(|(entry, _)| entry)
    }
}

/// Token contained in a key; first key in table order wins
pub struct SubstringMatch;

impl MatchStrategy for SubstringMatch {
    fn kind(&self) -> MatchKind {
        MatchKind::Substring
    }

    fn find<'t>(&self, token: &str, foods: &'t FoodTable) -> Option<&'t FoodEntry> {
        foods
            .iter()
            .find(|entry| entry.key.to_lowercase().contains(token))
    }
}
