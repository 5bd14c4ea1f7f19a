//! Application layer for uniapp
//!
//! This crate contains the applicant/program/question services and the port
//! definitions they depend on. It depends only on the domain layer.

pub mod ports;
pub mod services;

// Re-export commonly used types
pub use ports::{
    RepositoryError,
    applicant_repository::ApplicantRepository,
    audit_log::{AuditEvent, AuditLogger, NoAuditLogger},
    program_repository::ProgramRepository,
    question_repository::QuestionRepository,
};
pub use services::applicant_program::{
    ApplicantQuestion, Block, ReadOnlyApplicantProgramService,
};
pub use services::applicant_service::{ApplicantService, ApplicantServiceError, UpdateError};
pub use services::program_service::{ProgramService, ProgramServiceError};
pub use services::question_service::{
    QuestionService, QuestionServiceError, ReadOnlyQuestionService,
};
