//! Error handling for the job tailor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobTailorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Pattern compilation error: {0}")]
    Pattern(String),

    #[error("Invalid placeholder name: {0}")]
    InvalidPlaceholder(String),

    #[error("Invalid role catalog: {0}")]
    Catalog(String),

    #[error("Template structure changed during customization: {0}")]
    StructureValidation(String),
}

pub type Result<T> = std::result::Result<T, JobTailorError>;

impl From<regex::Error> for JobTailorError {
    fn from(err: regex::Error) -> Self {
        JobTailorError::Pattern(err.to_string())
    }
}
