//! Error types for scholarship-finder.

use thiserror::Error;

/// Errors that can occur in scholarship-finder operations.
#[derive(Error, Debug)]
pub enum ScholarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Malformed stored credential: {0}")]
    Credential(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for ScholarError {
    fn from(e: rusqlite::Error) -> Self {
        ScholarError::Storage(e.to_string())
    }
}

/// Result type alias for scholarship-finder operations.
pub type ScholarResult<T> = Result<T, ScholarError>;
