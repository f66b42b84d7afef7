//! Error types for chp-inspector

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fleet file error: {0}")]
    Fleet(String),

    #[error("Unknown fleet unit: {0}")]
    UnknownUnit(String),

    #[error("Invalid inspection record: {0}")]
    InvalidRecord(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Document generation failed: {0}")]
    Generation(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
