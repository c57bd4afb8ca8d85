mod table;


pub use table::{UnitTable, UnitWeight};

/// Grams assumed per unit when a recognized unit word has no fixed weight
pub const DEFAULT_UNKNOWN_UNIT_GRAMS: f64 = 100.0;

/// Unit words the parser recognizes but that carry no fixed weight.
///
/// These take the "unrecognized unit" branch of quantity resolution.
pub const UNWEIGHTED_UNIT_WORDS: &[&str] = &[
    "bowl", "bowls", "plate", "plates", "glass", "glasses", "handful", "handfuls",
];
