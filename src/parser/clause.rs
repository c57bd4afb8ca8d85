/// One food mention cut out of the meal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawClause {
    /// Zero-based position among the non-empty clauses
    pub index: usize,
    /// Trimmed clause text
    pub text: String,
}

/// Split meal text on commas and the standalone word "and".
///
/// "and" only splits on word boundaries, so "sandwich" stays whole.
/// Empty and whitespace-only pieces are dropped.
pub fn split_clauses(text: &str) -> Vec<RawClause> {
    regex!(r"(?i),|\band\b")
        .split(text)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(index, part)| RawClause {
            index,
            text: part.to_string(),
        })
        .collect()
}
