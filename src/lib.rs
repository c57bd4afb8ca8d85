#[macro_use]
mod macros;

// Public API exports
pub mod analysis;
pub mod audit;
pub mod config;
pub mod dietary;
pub mod foods;
pub mod matcher;
pub mod nutrition;
pub mod parser;
pub mod units;

// Re-export main types for convenience
pub use analysis::{AnalysisError, AnalysisResult, AnalysisWarning, ItemReport, MealAnalyzer};
pub use audit::{AuditRecord, AuditSink, LogCipher, NoopAuditSink, SqliteAuditLog};
pub use config::{AnalyzerConfig, ConfigError};

pub use foods::{FoodEntry, FoodTable, FoodTableError};
pub use matcher::{similarity_ratio, FoodMatcher, MatchKind, MatchOutcome, MatchStrategy};
pub use parser::{split_clauses, MealParser, ParsedItem, RawClause};
pub use units::UnitTable;

pub use dietary::{DietaryAnalyzer, DietaryFlag, DietaryReport, RdiThresholds, SuggestionCatalog};
pub use nutrition::{aggregate, nutrients_for, Nutrient, NutrientAmounts};
