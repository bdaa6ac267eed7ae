//! Error types for the PII engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PiiError {
    #[error("Pattern compilation error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PiiError>;
