//! Program service.
//!
//! Administrator-facing CRUD over programs and their block structure.

use crate::ports::RepositoryError;
use crate::ports::audit_log::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::program_repository::ProgramRepository;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uniapp_domain::{ProgramDefinition, ProgramQuestionDefinition};

/// Errors that can occur while managing programs.
#[derive(Error, Debug)]
pub enum ProgramServiceError {
    #[error("Program not found: {0}")]
    ProgramNotFound(i64),

    #[error("Block {block} not found in program {program}")]
    BlockNotFound { program: i64, block: i64 },

    #[error("Program name cannot be empty")]
    EmptyName,

    #[error("A program named '{0}' already exists")]
    DuplicateProgramName(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Service for creating programs and editing their block structure.
pub struct ProgramService {
    programs: Arc<dyn ProgramRepository>,
    audit: Arc<dyn AuditLogger>,
}

impl ProgramService {
    pub fn new(programs: Arc<dyn ProgramRepository>) -> Self {
        Self {
            programs,
            audit: Arc::new(NoAuditLogger),
        }
    }

    /// Create with an audit logger.
    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Create an empty program. Program names are unique.
    pub async fn create_program(
        &self,
        name: &str,
        description: &str,
    ) -> Result<ProgramDefinition, ProgramServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProgramServiceError::EmptyName);
        }
        if self.programs.lookup_by_name(name).await?.is_some() {
            return Err(ProgramServiceError::DuplicateProgramName(name.to_string()));
        }

        let created = self
            .programs
            .insert(ProgramDefinition::new(name, description))
            .await?;
        info!("Created program '{}'", created.name());
        self.audit.log(AuditEvent::new(
            "program_created",
            serde_json::json!({
                "id": created.id(),
                "name": created.name(),
            }),
        ));
        Ok(created)
    }

    /// One program by id.
    pub async fn get_program(&self, id: i64) -> Result<ProgramDefinition, ProgramServiceError> {
        self.programs
            .lookup(id)
            .await?
            .ok_or(ProgramServiceError::ProgramNotFound(id))
    }

    /// All programs, in id order.
    pub async fn list_programs(&self) -> Result<Vec<ProgramDefinition>, ProgramServiceError> {
        Ok(self.programs.list().await?)
    }

    /// Append an empty block to a program.
    pub async fn add_block(
        &self,
        program_id: i64,
        name: &str,
        description: &str,
    ) -> Result<ProgramDefinition, ProgramServiceError> {
        let mut program = self.get_program(program_id).await?;
        let block_id = program.add_block(name, description);
        self.programs.update(&program).await?;
        self.audit.log(AuditEvent::new(
            "block_added",
            serde_json::json!({
                "program_id": program_id,
                "block_id": block_id,
                "name": name,
            }),
        ));
        Ok(program)
    }

    /// Rename a block and update its description.
    pub async fn update_block(
        &self,
        program_id: i64,
        block_id: i64,
        name: &str,
        description: &str,
    ) -> Result<ProgramDefinition, ProgramServiceError> {
        let mut program = self.get_program(program_id).await?;
        let block = program
            .block_mut(block_id)
            .ok_or(ProgramServiceError::BlockNotFound {
                program: program_id,
                block: block_id,
            })?;
        block.set_name(name);
        block.set_description(description);
        self.programs.update(&program).await?;
        self.audit.log(AuditEvent::new(
            "block_updated",
            serde_json::json!({
                "program_id": program_id,
                "block_id": block_id,
            }),
        ));
        Ok(program)
    }

    /// Replace a block's question list.
    pub async fn set_block_questions(
        &self,
        program_id: i64,
        block_id: i64,
        questions: Vec<ProgramQuestionDefinition>,
    ) -> Result<ProgramDefinition, ProgramServiceError> {
        let mut program = self.get_program(program_id).await?;
        let block = program
            .block_mut(block_id)
            .ok_or(ProgramServiceError::BlockNotFound {
                program: program_id,
                block: block_id,
            })?;
        let count = questions.len();
        block.set_program_question_definitions(questions);
        self.programs.update(&program).await?;
        self.audit.log(AuditEvent::new(
            "block_questions_set",
            serde_json::json!({
                "program_id": program_id,
                "block_id": block_id,
                "question_count": count,
            }),
        ));
        Ok(program)
    }
}
