//! Domain layer for uniapp
//!
//! This crate contains the core business entities and value objects for the
//! universal benefits-application platform. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Applicant data
//!
//! An applicant's answers live in a single JSON document addressed by dotted
//! [`Path`]s (`applicant.name.first`). [`ApplicantData`] supports typed reads
//! and structure-creating writes against that document.
//!
//! ## Programs and questions
//!
//! Administrators define [`QuestionDefinition`]s (each owning a subtree of
//! scalar paths) and group them into the ordered blocks of a
//! [`ProgramDefinition`] — the steps of a multi-step application form.

pub mod applicant;
pub mod core;
pub mod program;
pub mod question;

// Re-export commonly used types
pub use applicant::{
    data::ApplicantData,
    entities::Applicant,
    path::Path,
    update::Update,
};
pub use crate::core::error::DomainError;
pub use program::entities::{BlockDefinition, ProgramDefinition, ProgramQuestionDefinition};
pub use question::{
    entities::{QuestionDefinition, QuestionType},
    localized::{LocalizedText, DEFAULT_LOCALE},
    scalars::ScalarType,
};
