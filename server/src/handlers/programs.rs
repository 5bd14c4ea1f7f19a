//! Program administration endpoints.

use crate::dto::{BlockRequest, CreateProgramRequest, ProgramResponse, SetBlockQuestionsRequest};
use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use uniapp_domain::ProgramQuestionDefinition;

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateProgramRequest>,
) -> Result<(StatusCode, Json<ProgramResponse>), ApiError> {
    let program = state
        .program_service
        .create_program(&req.name, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(ProgramResponse::from(&program))))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProgramResponse>>, ApiError> {
    let programs = state.program_service.list_programs().await?;
    Ok(Json(programs.iter().map(ProgramResponse::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<i64>,
) -> Result<Json<ProgramResponse>, ApiError> {
    let program = state.program_service.get_program(id).await?;
    Ok(Json(ProgramResponse::from(&program)))
}

pub async fn add_block(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<i64>,
    Json(req): Json<BlockRequest>,
) -> Result<(StatusCode, Json<ProgramResponse>), ApiError> {
    let program = state
        .program_service
        .add_block(id, &req.name, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(ProgramResponse::from(&program))))
}

pub async fn update_block(
    State(state): State<AppState>,
    UrlPath((id, block_id)): UrlPath<(i64, i64)>,
    Json(req): Json<BlockRequest>,
) -> Result<Json<ProgramResponse>, ApiError> {
    let program = state
        .program_service
        .update_block(id, block_id, &req.name, &req.description)
        .await?;
    Ok(Json(ProgramResponse::from(&program)))
}

/// Replace a block's question list with the questions named by id.
pub async fn set_block_questions(
    State(state): State<AppState>,
    UrlPath((id, block_id)): UrlPath<(i64, i64)>,
    Json(req): Json<SetBlockQuestionsRequest>,
) -> Result<Json<ProgramResponse>, ApiError> {
    let mut questions = Vec::with_capacity(req.question_ids.len());
    for question_id in &req.question_ids {
        let question = state
            .question_service
            .get_question(*question_id)
            .await?
            .ok_or_else(|| {
                ApiError::unprocessable(
                    "unknown_question",
                    format!("Question not found: {}", question_id),
                )
            })?;
        questions.push(ProgramQuestionDefinition::new(question));
    }

    let program = state
        .program_service
        .set_block_questions(id, block_id, questions)
        .await?;
    Ok(Json(ProgramResponse::from(&program)))
}
