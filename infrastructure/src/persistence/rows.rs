//! Row structs: the SQL shape of each table, with conversions to and from
//! domain entities. JSON columns round-trip through serde_json.

use serde::{Deserialize, Serialize};
use uniapp_application::RepositoryError;
use uniapp_domain::{
    Applicant, ApplicantData, BlockDefinition, LocalizedText, Path, ProgramDefinition,
    QuestionDefinition, QuestionType,
};

fn decode_err(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Serialization(e.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantRow {
    pub id: i64,
    pub account_id: i64,
    pub object: String,
}

impl ApplicantRow {
    pub fn into_domain(self) -> Result<Applicant, RepositoryError> {
        let data = ApplicantData::from_json_str(&self.object).map_err(decode_err)?;
        Ok(Applicant::with_id(self.id, self.account_id, data))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub block_definitions: String,
}

impl ProgramRow {
    pub fn into_domain(self) -> Result<ProgramDefinition, RepositoryError> {
        let blocks: Vec<BlockDefinition> =
            serde_json::from_str(&self.block_definitions).map_err(decode_err)?;
        let mut program = ProgramDefinition::new(self.name, self.description).with_id(self.id);
        program.set_block_definitions(blocks);
        Ok(program)
    }

    pub fn blocks_json(program: &ProgramDefinition) -> Result<String, RepositoryError> {
        serde_json::to_string(program.block_definitions()).map_err(decode_err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRow {
    pub id: i64,
    pub version: i64,
    pub name: String,
    pub description: String,
    pub path: String,
    pub question_type: String,
    pub question_text: String,
    pub question_help_text: String,
}

impl QuestionRow {
    pub fn into_domain(self) -> Result<QuestionDefinition, RepositoryError> {
        let question_type: QuestionType = self.question_type.parse().map_err(decode_err)?;
        let question_text: LocalizedText =
            serde_json::from_str(&self.question_text).map_err(decode_err)?;
        let question_help_text: LocalizedText =
            serde_json::from_str(&self.question_help_text).map_err(decode_err)?;
        Ok(QuestionDefinition::new(
            self.name,
            Path::new(self.path),
            self.description,
            question_text,
            question_help_text,
            question_type,
        )
        .with_id(self.id)
        .with_version(self.version))
    }

    pub fn text_json(text: &LocalizedText) -> Result<String, RepositoryError> {
        serde_json::to_string(text).map_err(decode_err)
    }
}
