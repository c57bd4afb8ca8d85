use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodTableError {
    #[error("Failed to read food table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse food table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Food key must not be empty")]
    EmptyKey,

    #[error("Duplicate food key: {0}")]
    DuplicateKey(String),

    #[error("Invalid {field} for {key}: {value}")]
    InvalidValue {
        key: String,
        field: &'static str,
        value: f64,
    },
}
