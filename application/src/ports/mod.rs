//! Ports: abstractions the application layer depends on.
//!
//! Implementations live in the infrastructure layer.

pub mod applicant_repository;
pub mod audit_log;
pub mod program_repository;
pub mod question_repository;

use thiserror::Error;

/// Errors surfaced by repository ports.
///
/// `NotFound` is reserved for operations that require the row to exist
/// (updates); lookups model absence as `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Stored record could not be decoded: {0}")]
    Serialization(String),
}
