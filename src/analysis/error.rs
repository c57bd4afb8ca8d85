use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Empty input: describe at least one food")]
    EmptyInput,
}

/// Non-fatal problems noticed while analyzing a meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// A clause matched no known food and contributes no nutrition
    UnmatchedFood { clause: String },
    /// The audit sink rejected the record
    AuditSinkFailure { message: String },
}
