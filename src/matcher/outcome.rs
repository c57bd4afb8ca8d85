use serde::{Deserialize, Serialize};

/// How a token was resolved to a food key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Case-insensitive equality with a key
    Exact,
    /// Similarity ratio at or above the cutoff
    Fuzzy,
    /// Token is contained in a key
    Substring,
    /// Nothing matched
    None,
}

impl MatchKind {
    /// Confidence reported for this kind of match
    pub fn confidence(self) -> f64 {
        match self {
            MatchKind::Exact => 1.0,
            MatchKind::Fuzzy => 0.8,
            MatchKind::Substring => 0.7,
            MatchKind::None => 0.0,
        }
    }
}

/// Result of matching one token against the food table
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub food_key: Option<String>,
    pub kind: MatchKind,
}

impl MatchOutcome {
    pub fn matched(food_key: impl Into<String>, kind: MatchKind) -> Self {
        Self {
            food_key: Some(food_key.into()),
            kind,
        }
    }

    pub fn unmatched() -> Self {
        Self {
            food_key: None,
            kind: MatchKind::None,
        }
    }

    pub fn confidence(&self) -> f64 {
        self.kind.confidence()
    }

    pub fn is_match(&self) -> bool {
        self.food_key.is_some()
    }
}
