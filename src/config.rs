use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::dietary::{RdiThresholds, SuggestionCatalog};
use crate::foods::DEFAULT_SERVING_G;
use crate::matcher::DEFAULT_FUZZY_CUTOFF;
use crate::units::DEFAULT_UNKNOWN_UNIT_GRAMS;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Tunables for meal analysis; every field is optional in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Daily intake targets used for flags
    pub rdi: RdiThresholds,
    /// Suggestion text per flagged nutrient
    pub suggestions: SuggestionCatalog,
    /// Minimum similarity ratio for a fuzzy food match
    pub fuzzy_cutoff: f64,
    /// Grams per unit for unit words without a fixed weight
    pub unknown_unit_grams: f64,
    /// Serving size for foods that did not match
    pub fallback_serving_g: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            rdi: RdiThresholds::default(),
            suggestions: SuggestionCatalog::default(),
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
            unknown_unit_grams: DEFAULT_UNKNOWN_UNIT_GRAMS,
            fallback_serving_g: DEFAULT_SERVING_G,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject values that would break the `grams > 0` invariant or the matcher
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.fuzzy_cutoff) {
            return Err(ConfigError::Invalid {
                field: "fuzzy_cutoff",
                value: self.fuzzy_cutoff,
            });
        }

        for (field, value) in [
            ("unknown_unit_grams", self.unknown_unit_grams),
            ("fallback_serving_g", self.fallback_serving_g),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::Nutrient;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.fuzzy_cutoff, 0.6);
        assert_eq!(config.unknown_unit_grams, 100.0);
        assert_eq!(config.fallback_serving_g, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = AnalyzerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            AnalyzerConfig::from_json_str(r#"{"fuzzy_cutoff": 0.75, "rdi": {"protein": 65}}"#)
                .unwrap();
        assert_eq!(config.fuzzy_cutoff, 0.75);
        assert_eq!(config.rdi.target(Nutrient::Protein), Some(65.0));
        assert_eq!(config.rdi.target(Nutrient::Calories), Some(2000.0));
    }

    #[test]
    fn test_reject_cutoff_out_of_range() {
        let err = AnalyzerConfig::from_json_str(r#"{"fuzzy_cutoff": 1.5}"#).unwrap_err();
        assert!(err.to_string().contains("fuzzy_cutoff"));
    }

    #[test]
    fn test_reject_non_positive_grams() {
        let err = AnalyzerConfig::from_json_str(r#"{"fallback_serving_g": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "fallback_serving_g", .. }));

        let err = AnalyzerConfig::from_json_str(r#"{"unknown_unit_grams": -3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "unknown_unit_grams", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = AnalyzerConfig::from_json_file("/no/such/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
