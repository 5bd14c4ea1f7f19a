//! API error type and mappings from service errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use uniapp_application::{
    ApplicantServiceError, ProgramServiceError, QuestionServiceError, RepositoryError,
};

/// An API-level error: a status code plus a machine-readable code and a
/// human-readable message, rendered as `{"error": {"code", "message"}}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn unprocessable(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, code, message)
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));
        (self.status, body).into_response()
    }
}

fn repository(e: RepositoryError) -> ApiError {
    error!("Repository failure: {}", e);
    ApiError::internal("storage failure")
}

impl From<ApplicantServiceError> for ApiError {
    fn from(e: ApplicantServiceError) -> Self {
        match e {
            ApplicantServiceError::ApplicantNotFound(_)
            | ApplicantServiceError::ProgramNotFound(_)
            | ApplicantServiceError::BlockNotFound { .. } => ApiError::not_found(e.to_string()),
            ApplicantServiceError::InvalidUpdates(ref errors) => {
                let detail = errors
                    .iter()
                    .map(|u| u.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                ApiError::unprocessable("invalid_updates", detail)
            }
            ApplicantServiceError::Repository(e) => repository(e),
        }
    }
}

impl From<ProgramServiceError> for ApiError {
    fn from(e: ProgramServiceError) -> Self {
        match e {
            ProgramServiceError::ProgramNotFound(_) | ProgramServiceError::BlockNotFound { .. } => {
                ApiError::not_found(e.to_string())
            }
            ProgramServiceError::EmptyName | ProgramServiceError::DuplicateProgramName(_) => {
                ApiError::unprocessable("invalid_program", e.to_string())
            }
            ProgramServiceError::Repository(e) => repository(e),
        }
    }
}

impl From<QuestionServiceError> for ApiError {
    fn from(e: QuestionServiceError) -> Self {
        match e {
            QuestionServiceError::EmptyName
            | QuestionServiceError::RootPath
            | QuestionServiceError::DuplicatePath(_)
            | QuestionServiceError::PathConflict { .. } => {
                ApiError::unprocessable("invalid_question", e.to_string())
            }
            QuestionServiceError::Repository(e) => repository(e),
        }
    }
}
