mod chain;
mod outcome;
mod similarity;
mod strategies;


pub use chain::FoodMatcher;
pub use outcome::{MatchKind, MatchOutcome};
pub use similarity::similarity_ratio;
pub use strategies::{ExactMatch, FuzzyMatch, SubstringMatch, DEFAULT_FUZZY_CUTOFF};

use crate::foods::{FoodEntry, FoodTable};

/// One step of the food matching chain.
///
/// Strategies are tried in order by [`FoodMatcher`]; the first one that
/// returns an entry decides the match and its confidence.
pub trait MatchStrategy: Send + Sync {
    /// Which kind of match this strategy produces
    fn kind(&self) -> MatchKind;

    /// Find a table entry for an already trimmed, lowercased, non-empty token
    fn find<'t>(&self, token: &str, foods: &'t FoodTable) -> Option<&'t FoodEntry>;
}
