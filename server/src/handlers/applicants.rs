//! Applicant endpoints: creation, lookup, and the form flow.

use crate::dto::{
    ApplicantProgramResponse, ApplicantResponse, BlockUpdatesRequest, CreateApplicantRequest,
};
use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use uniapp_domain::{Path, Update};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateApplicantRequest>,
) -> Result<(StatusCode, Json<ApplicantResponse>), ApiError> {
    let applicant = state
        .applicant_service
        .create_applicant(req.account_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApplicantResponse::from(&applicant))))
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicantResponse>>, ApiError> {
    let applicants = state.applicant_service.list_applicants().await?;
    Ok(Json(applicants.iter().map(ApplicantResponse::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<i64>,
) -> Result<Json<ApplicantResponse>, ApiError> {
    let applicant = state
        .applicant_service
        .get_applicant(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Applicant not found: {}", id)))?;
    Ok(Json(ApplicantResponse::from(&applicant)))
}

/// The applicant's view of one program: block list with answer state.
pub async fn program_view(
    State(state): State<AppState>,
    UrlPath((id, program_id)): UrlPath<(i64, i64)>,
) -> Result<Json<ApplicantProgramResponse>, ApiError> {
    let read_only = state
        .applicant_service
        .get_read_only_applicant_program_service(id, program_id)
        .await?;
    Ok(Json(ApplicantProgramResponse::from(&read_only)))
}

/// Stage one block's worth of answers; persists only if all of them are
/// valid for that block.
pub async fn update_block(
    State(state): State<AppState>,
    UrlPath((id, program_id, block_id)): UrlPath<(i64, i64, i64)>,
    Json(req): Json<BlockUpdatesRequest>,
) -> Result<Json<ApplicantProgramResponse>, ApiError> {
    let updates: Vec<Update> = req
        .updates
        .into_iter()
        .map(|u| Update::new(Path::new(u.path), u.value))
        .collect();
    let read_only = state
        .applicant_service
        .stage_and_update_if_valid(id, program_id, block_id, &updates)
        .await?;
    Ok(Json(ApplicantProgramResponse::from(&read_only)))
}
