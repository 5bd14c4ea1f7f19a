//! Question administration endpoints.

use crate::dto::{CreateQuestionRequest, QuestionResponse};
use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use uniapp_domain::{Path, QuestionDefinition};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let definition = QuestionDefinition::new(
        req.name,
        Path::new(req.path),
        req.description,
        req.question_text,
        req.question_help_text,
        req.question_type,
    );
    let created = state.question_service.create(definition).await?;
    Ok((StatusCode::CREATED, Json(QuestionResponse::from(&created))))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<QuestionResponse>>, ApiError> {
    let questions = state.question_service.list_questions().await?;
    Ok(Json(questions.iter().map(QuestionResponse::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<i64>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = state
        .question_service
        .get_question(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Question not found: {}", id)))?;
    Ok(Json(QuestionResponse::from(&question)))
}
