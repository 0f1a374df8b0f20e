use thiserror::Error;

use crate::domain::validation::FormErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid validation pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("{0} Not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed:\n{0}")]
    Form(#[from] FormErrors),
}
