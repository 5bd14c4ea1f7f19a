//! Infrastructure layer for uniapp
//!
//! This crate contains the adapters behind the application-layer ports:
//! SQLite-backed repositories, configuration loading, and the JSONL audit
//! logger.

pub mod config;
pub mod logging;
pub mod persistence;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlAuditLogger;
pub use persistence::{
    Database, SqliteApplicantRepository, SqliteProgramRepository, SqliteQuestionRepository,
};
