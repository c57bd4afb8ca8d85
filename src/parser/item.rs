use crate::matcher::MatchKind;

/// Which clause shape produced the quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseShape {
    /// "150g chicken"
    ExplicitGrams,
    /// "2 cups rice", "3 eggs", "2 bananas"
    Quantified,
    /// "banana"
    BareFood,
}

/// A clause resolved to a food and a weight
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    /// Clause text as it appeared in the input
    pub raw: String,
    /// Food phrase left after removing quantity and unit
    pub food_text: String,
    /// Matched table key, `None` when nothing matched
    pub food_key: Option<String>,
    /// Weight in grams, finite and positive
    pub grams: f64,
    pub match_kind: MatchKind,
    pub shape: ClauseShape,
}

impl ParsedItem {
    pub fn confidence(&self) -> f64 {
        self.match_kind.confidence()
    }

    pub fn is_matched(&self) -> bool {
        self.food_key.is_some()
    }
}
