//! Application state shared across handlers

use std::sync::Arc;
use uniapp_application::{ApplicantService, ProgramService, QuestionService};

/// Shared handler state: the three application services.
#[derive(Clone)]
pub struct AppState {
    pub applicant_service: Arc<ApplicantService>,
    pub program_service: Arc<ProgramService>,
    pub question_service: Arc<QuestionService>,
}

impl AppState {
    pub fn new(
        applicant_service: Arc<ApplicantService>,
        program_service: Arc<ProgramService>,
        question_service: Arc<QuestionService>,
    ) -> Self {
        Self {
            applicant_service,
            program_service,
            question_service,
        }
    }
}
