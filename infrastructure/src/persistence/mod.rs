//! SQLite persistence adapters.
//!
//! A single [`Database`] owns the connection; repositories share it behind a
//! mutex and run short synchronous statements inline from their async trait
//! methods.

pub mod applicant_repository;
pub mod database;
pub mod program_repository;
pub mod question_repository;
pub mod rows;
pub mod schema;

pub use applicant_repository::SqliteApplicantRepository;
pub use database::Database;
pub use program_repository::SqliteProgramRepository;
pub use question_repository::SqliteQuestionRepository;

use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};
use uniapp_application::RepositoryError;

/// Map any storage-layer failure into the port error type.
pub(crate) fn storage_err(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// Lock the shared connection, surfacing poisoning as a storage error.
pub(crate) fn lock_conn(
    conn: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
    conn.lock()
        .map_err(|_| RepositoryError::Storage("connection lock poisoned".to_string()))
}
