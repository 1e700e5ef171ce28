use crate::models::Role;
use thiserror::Error;

/// All possible errors in the record store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid record #{index}: {field} {reason}")]
    Validation {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Line {line}: expected 3 fields (first_name,last_name,gender), found {found}")]
    Parse { line: u64, found: usize },

    #[error("{role} #{id} not found")]
    NotFound { role: Role, id: i64 },

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;
