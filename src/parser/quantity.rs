use once_cell::sync::Lazy;
use regex::Regex;

use crate::units::UnitTable;

/// Quantity and food phrase pulled out of one clause
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Extracted {
    /// An explicit `<n>g` token; grams are literal
    Grams { grams: f64, food_text: String },
    /// Optional count, optional unit word, then the food phrase
    Counted {
        quantity: Option<f64>,
        unit: Option<String>,
        food_text: String,
    },
}

static QUANTITY_RE: Lazy<Regex> = Lazy::new(|| {
    let units = UnitTable::global()
        .unit_words()
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r"(?is)^(?:(?P<number>\d+(?:\.\d+)?)\s*(?:(?P<unit>{units})\b)?\s*(?:of\b)?)?\s*(?P<food>.*)$"
    );
    Regex::new(&pattern).unwrap()
});

/// Try the explicit-grams shape first, then number/unit/food
pub(crate) fn extract(clause: &str) -> Extracted {
    explicit_grams(clause).unwrap_or_else(|| counted(clause))
}

fn explicit_grams(clause: &str) -> Option<Extracted> {
    let re = regex!(r"(?i)(\d+(?:\.\d+)?)\s*g\b");
    let grams = re
        .captures(clause)
        .and_then(|caps| caps.get(1))
        .and_then(|m| positive_number(m.as_str()))?;

    let rest = re.replace_all(clause, " ");
    let food_text = strip_leading_of(&collapse_whitespace(&rest));

    Some(Extracted::Grams { grams, food_text })
}

fn counted(clause: &str) -> Extracted {
    // Every group is optional, so the pattern matches any clause
    let caps = QUANTITY_RE.captures(clause);
    let group = |name: &str| caps.as_ref().and_then(|c| c.name(name));

    let quantity = group("number").and_then(|m| positive_number(m.as_str()));
    let unit = group("unit").map(|m| m.as_str().to_lowercase());
    let mut food_text = group("food")
        .map(|m| collapse_whitespace(m.as_str()).to_lowercase())
        .unwrap_or_default();

    // "2 eggs": the unit word is also the food
    if food_text.is_empty() {
        if let Some(unit) = &unit {
            food_text = UnitTable::global()
                .lookup(unit)
                .map(|w| w.canonical.to_string())
                .unwrap_or_else(|| unit.clone());
        }
    }

    Extracted::Counted {
        quantity,
        unit,
        food_text,
    }
}

/// Parse a quantity; zero and non-finite values count as absent
fn positive_number(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_leading_of(text: &str) -> String {
    let lower = text.to_lowercase();
    match lower.strip_prefix("of ") {
        Some(rest) => rest.to_string(),
        None if lower == "of" => String::new(),
        None => lower,
    }
}
