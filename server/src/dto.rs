//! Request and response bodies for the REST API.

use serde::{Deserialize, Serialize};
use uniapp_application::ReadOnlyApplicantProgramService;
use uniapp_domain::{
    Applicant, LocalizedText, ProgramDefinition, QuestionDefinition, QuestionType,
};

// ==================== Applicants ====================

#[derive(Debug, Deserialize)]
pub struct CreateApplicantRequest {
    pub account_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ApplicantResponse {
    pub id: Option<i64>,
    pub account_id: i64,
    pub data: serde_json::Value,
}

impl From<&Applicant> for ApplicantResponse {
    fn from(applicant: &Applicant) -> Self {
        Self {
            id: applicant.id(),
            account_id: applicant.account_id(),
            data: applicant.data().as_value().clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDto {
    pub path: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct BlockUpdatesRequest {
    pub updates: Vec<UpdateDto>,
}

#[derive(Debug, Serialize)]
pub struct QuestionStateDto {
    pub name: String,
    pub answered: bool,
}

#[derive(Debug, Serialize)]
pub struct BlockStateDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub complete: bool,
    pub questions: Vec<QuestionStateDto>,
}

/// One applicant's progress through one program's form.
#[derive(Debug, Serialize)]
pub struct ApplicantProgramResponse {
    pub program_id: Option<i64>,
    pub blocks: Vec<BlockStateDto>,
    pub first_incomplete_block: Option<i64>,
}

impl From<&ReadOnlyApplicantProgramService> for ApplicantProgramResponse {
    fn from(service: &ReadOnlyApplicantProgramService) -> Self {
        let blocks = service
            .block_list()
            .into_iter()
            .map(|block| BlockStateDto {
                id: block.id(),
                name: block.name().to_string(),
                description: block.description().to_string(),
                complete: block.is_complete(),
                questions: block
                    .questions()
                    .iter()
                    .map(|q| QuestionStateDto {
                        name: q.definition().name().to_string(),
                        answered: q.is_answered(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            program_id: service.program().id(),
            blocks,
            first_incomplete_block: service.first_incomplete_block().map(|b| b.id()),
        }
    }
}

// ==================== Programs ====================

#[derive(Debug, Deserialize)]
pub struct CreateProgramRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct SetBlockQuestionsRequest {
    pub question_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProgramQuestionDto {
    pub id: Option<i64>,
    pub name: String,
    pub path: String,
    pub question_type: QuestionType,
}

#[derive(Debug, Serialize)]
pub struct BlockDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub questions: Vec<ProgramQuestionDto>,
}

#[derive(Debug, Serialize)]
pub struct ProgramResponse {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub blocks: Vec<BlockDto>,
}

impl From<&ProgramDefinition> for ProgramResponse {
    fn from(program: &ProgramDefinition) -> Self {
        let blocks = program
            .block_definitions()
            .iter()
            .map(|block| BlockDto {
                id: block.id(),
                name: block.name().to_string(),
                description: block.description().to_string(),
                questions: block
                    .program_question_definitions()
                    .iter()
                    .map(|pqd| {
                        let q = pqd.question();
                        ProgramQuestionDto {
                            id: q.id(),
                            name: q.name().to_string(),
                            path: q.path().to_string(),
                            question_type: q.question_type(),
                        }
                    })
                    .collect(),
            })
            .collect();
        Self {
            id: program.id(),
            name: program.name().to_string(),
            description: program.description().to_string(),
            blocks,
        }
    }
}

// ==================== Questions ====================

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub question_text: LocalizedText,
    #[serde(default)]
    pub question_help_text: LocalizedText,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: Option<i64>,
    pub version: i64,
    pub name: String,
    pub path: String,
    pub description: String,
    pub question_type: QuestionType,
    pub question_text: LocalizedText,
    pub question_help_text: LocalizedText,
}

impl From<&QuestionDefinition> for QuestionResponse {
    fn from(q: &QuestionDefinition) -> Self {
        Self {
            id: q.id(),
            version: q.version(),
            name: q.name().to_string(),
            path: q.path().to_string(),
            description: q.description().to_string(),
            question_type: q.question_type(),
            question_text: q.question_text().clone(),
            question_help_text: q.question_help_text().clone(),
        }
    }
}
