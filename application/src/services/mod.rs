//! Application services (use cases) over the repository ports.

pub mod applicant_program;
pub mod applicant_service;
pub mod program_service;
pub mod question_service;
