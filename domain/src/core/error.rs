//! Domain error types

use crate::applicant::path::Path;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Path not found: {0}")]
    PathNotFound(Path),

    #[error("Cannot write through non-object value at '{0}'")]
    NotAnObject(Path),

    #[error("Cannot write to the empty root path")]
    EmptyRootPath,

    #[error("No translation for locale '{0}'")]
    TranslationNotFound(String),

    #[error("Invalid applicant document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

impl DomainError {
    /// Check if this error represents a missing path
    pub fn is_path_not_found(&self) -> bool {
        matches!(self, DomainError::PathNotFound(_))
    }
}
