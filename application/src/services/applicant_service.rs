//! Applicant service.
//!
//! Creates applicants and applies staged form updates. Updates are validated
//! against the target block before anything is persisted: either every
//! update lands, or none do.

use crate::ports::RepositoryError;
use crate::ports::applicant_repository::ApplicantRepository;
use crate::ports::audit_log::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::program_repository::ProgramRepository;
use crate::services::applicant_program::ReadOnlyApplicantProgramService;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uniapp_domain::{Applicant, DomainError, Path, Update};

/// Why a single staged update was rejected.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Path '{0}' is not part of this block")]
    PathNotInBlock(Path),

    #[error(transparent)]
    Path(DomainError),
}

/// Errors that can occur while creating or updating applicants.
#[derive(Error, Debug)]
pub enum ApplicantServiceError {
    #[error("Applicant not found: {0}")]
    ApplicantNotFound(i64),

    #[error("Program not found: {0}")]
    ProgramNotFound(i64),

    #[error("Block {block} not found in program {program}")]
    BlockNotFound { program: i64, block: i64 },

    #[error("{} update(s) rejected", .0.len())]
    InvalidUpdates(Vec<UpdateError>),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Service for applicant creation and form progression.
pub struct ApplicantService {
    applicants: Arc<dyn ApplicantRepository>,
    programs: Arc<dyn ProgramRepository>,
    audit: Arc<dyn AuditLogger>,
}

impl ApplicantService {
    pub fn new(
        applicants: Arc<dyn ApplicantRepository>,
        programs: Arc<dyn ProgramRepository>,
    ) -> Self {
        Self {
            applicants,
            programs,
            audit: Arc::new(NoAuditLogger),
        }
    }

    /// Create with an audit logger.
    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Create a fresh applicant for `account_id` with an empty answer
    /// document.
    pub async fn create_applicant(
        &self,
        account_id: i64,
    ) -> Result<Applicant, ApplicantServiceError> {
        let applicant = self.applicants.insert(Applicant::new(account_id)).await?;
        info!(
            "Created applicant {:?} for account {}",
            applicant.id(),
            account_id
        );
        self.audit.log(AuditEvent::new(
            "applicant_created",
            serde_json::json!({
                "applicant_id": applicant.id(),
                "account_id": account_id,
            }),
        ));
        Ok(applicant)
    }

    /// One applicant by id. Absence is `Ok(None)`.
    pub async fn get_applicant(
        &self,
        id: i64,
    ) -> Result<Option<Applicant>, ApplicantServiceError> {
        Ok(self.applicants.lookup(id).await?)
    }

    /// All applicants, in id order.
    pub async fn list_applicants(&self) -> Result<Vec<Applicant>, ApplicantServiceError> {
        Ok(self.applicants.list().await?)
    }

    /// Stage `updates` against one block of one program, validate them, and
    /// persist if every update is acceptable.
    ///
    /// Every update path must be a scalar leaf owned by a question of the
    /// addressed block. An empty update set is a no-op and not an error —
    /// the applicant row is left untouched.
    ///
    /// Returns the refreshed [`ReadOnlyApplicantProgramService`] so callers
    /// can render the next form step.
    pub async fn stage_and_update_if_valid(
        &self,
        applicant_id: i64,
        program_id: i64,
        block_id: i64,
        updates: &[Update],
    ) -> Result<ReadOnlyApplicantProgramService, ApplicantServiceError> {
        let mut applicant = self
            .applicants
            .lookup(applicant_id)
            .await?
            .ok_or(ApplicantServiceError::ApplicantNotFound(applicant_id))?;
        let program = self
            .programs
            .lookup(program_id)
            .await?
            .ok_or(ApplicantServiceError::ProgramNotFound(program_id))?;
        let block = program
            .block(block_id)
            .ok_or(ApplicantServiceError::BlockNotFound {
                program: program_id,
                block: block_id,
            })?;

        if updates.is_empty() {
            debug!("No updates staged for applicant {}; skipping write", applicant_id);
            return Ok(ReadOnlyApplicantProgramService::new(
                applicant.data().clone(),
                program,
            ));
        }

        let mut staged = applicant.data().clone();
        let mut errors = Vec::new();
        for update in updates {
            if !block.owns_scalar(update.path()) {
                errors.push(UpdateError::PathNotInBlock(update.path().clone()));
                continue;
            }
            if let Err(e) = staged.put_string(update.path(), update.value()) {
                errors.push(UpdateError::Path(e));
            }
        }
        if !errors.is_empty() {
            return Err(ApplicantServiceError::InvalidUpdates(errors));
        }

        applicant.set_data(staged);
        self.applicants.update(&applicant).await?;
        info!(
            "Applied {} update(s) to applicant {} (program {}, block {})",
            updates.len(),
            applicant_id,
            program_id,
            block_id
        );
        self.audit.log(AuditEvent::new(
            "applicant_updated",
            serde_json::json!({
                "applicant_id": applicant_id,
                "program_id": program_id,
                "block_id": block_id,
                "update_count": updates.len(),
            }),
        ));

        Ok(ReadOnlyApplicantProgramService::new(
            applicant.data().clone(),
            program,
        ))
    }

    /// Read-only pairing of one applicant's data with one program.
    pub async fn get_read_only_applicant_program_service(
        &self,
        applicant_id: i64,
        program_id: i64,
    ) -> Result<ReadOnlyApplicantProgramService, ApplicantServiceError> {
        let applicant = self
            .applicants
            .lookup(applicant_id)
            .await?
            .ok_or(ApplicantServiceError::ApplicantNotFound(applicant_id))?;
        let program = self
            .programs
            .lookup(program_id)
            .await?
            .ok_or(ApplicantServiceError::ProgramNotFound(program_id))?;
        Ok(ReadOnlyApplicantProgramService::new(
            applicant.data().clone(),
            program,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uniapp_domain::{
        LocalizedText, ProgramDefinition, ProgramQuestionDefinition, QuestionDefinition,
        QuestionType,
    };

    // ==================== Test Mocks ====================

    struct MockApplicantRepository {
        applicants: Mutex<Vec<Applicant>>,
    }

    impl MockApplicantRepository {
        fn new() -> Self {
            Self {
                applicants: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ApplicantRepository for MockApplicantRepository {
        async fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
            let mut applicants = self.applicants.lock().unwrap();
            let id = applicants.len() as i64 + 1;
            let applicant =
                Applicant::with_id(id, applicant.account_id(), applicant.data().clone());
            applicants.push(applicant.clone());
            Ok(applicant)
        }

        async fn update(&self, applicant: &Applicant) -> Result<(), RepositoryError> {
            let mut applicants = self.applicants.lock().unwrap();
            let id = applicant
                .id()
                .ok_or_else(|| RepositoryError::NotFound("applicant without id".to_string()))?;
            match applicants.iter_mut().find(|a| a.id() == Some(id)) {
                Some(slot) => {
                    *slot = applicant.clone();
                    Ok(())
                }
                None => Err(RepositoryError::NotFound(format!("applicant {}", id))),
            }
        }

        async fn lookup(&self, id: i64) -> Result<Option<Applicant>, RepositoryError> {
            Ok(self
                .applicants
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id() == Some(id))
                .cloned())
        }

        async fn list(&self) -> Result<Vec<Applicant>, RepositoryError> {
            Ok(self.applicants.lock().unwrap().clone())
        }
    }

    struct MockProgramRepository {
        programs: Mutex<Vec<ProgramDefinition>>,
    }

    impl MockProgramRepository {
        fn with_program(program: ProgramDefinition) -> Self {
            Self {
                programs: Mutex::new(vec![program]),
            }
        }
    }

    #[async_trait]
    impl ProgramRepository for MockProgramRepository {
        async fn insert(
            &self,
            program: ProgramDefinition,
        ) -> Result<ProgramDefinition, RepositoryError> {
            let mut programs = self.programs.lock().unwrap();
            let id = programs.len() as i64 + 1;
            let program = program.with_id(id);
            programs.push(program.clone());
            Ok(program)
        }

        async fn update(&self, _program: &ProgramDefinition) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn lookup(&self, id: i64) -> Result<Option<ProgramDefinition>, RepositoryError> {
            Ok(self
                .programs
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id() == Some(id))
                .cloned())
        }

        async fn lookup_by_name(
            &self,
            name: &str,
        ) -> Result<Option<ProgramDefinition>, RepositoryError> {
            Ok(self
                .programs
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.name() == name)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<ProgramDefinition>, RepositoryError> {
            Ok(self.programs.lock().unwrap().clone())
        }
    }

    /// One program (id 1) with one block (id 1) holding a name question.
    fn test_program() -> ProgramDefinition {
        let question = QuestionDefinition::new(
            "my name",
            Path::new("applicant.name"),
            "description",
            LocalizedText::of("question?"),
            LocalizedText::of("help text"),
            QuestionType::Name,
        )
        .with_id(1);

        let mut program = ProgramDefinition::new("test program", "desc").with_id(1);
        program.add_block("test block", "test block description");
        program
            .block_mut(1)
            .unwrap()
            .set_program_question_definitions(vec![ProgramQuestionDefinition::new(question)]);
        program
    }

    fn service_with(program: ProgramDefinition) -> (ApplicantService, Arc<MockApplicantRepository>) {
        let applicants = Arc::new(MockApplicantRepository::new());
        let programs = Arc::new(MockProgramRepository::with_program(program));
        (
            ApplicantService::new(applicants.clone(), programs),
            applicants,
        )
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_create_applicant_assigns_id() {
        let (service, _) = service_with(test_program());
        let applicant = service.create_applicant(1).await.unwrap();
        assert!(applicant.id().is_some());
        assert_eq!(applicant.account_id(), 1);
    }

    #[tokio::test]
    async fn test_empty_update_set_is_not_an_error_and_does_not_change_applicant() {
        let (service, applicants) = service_with(test_program());
        let applicant = service.create_applicant(1).await.unwrap();
        let data_before = applicant.data().clone();

        let result = service
            .stage_and_update_if_valid(applicant.id().unwrap(), 1, 1, &[])
            .await;
        assert!(result.is_ok());

        let data_after = applicants
            .lookup(applicant.id().unwrap())
            .await
            .unwrap()
            .unwrap()
            .data()
            .clone();
        assert_eq!(data_after, data_before);
    }

    #[tokio::test]
    async fn test_valid_updates_are_persisted() {
        let (service, applicants) = service_with(test_program());
        let applicant = service.create_applicant(1).await.unwrap();

        let updates = vec![
            Update::new(Path::new("applicant.name.first"), "Alice"),
            Update::new(Path::new("applicant.name.last"), "Doe"),
        ];

        let read_only = service
            .stage_and_update_if_valid(applicant.id().unwrap(), 1, 1, &updates)
            .await
            .unwrap();
        assert_eq!(
            read_only
                .applicant_data()
                .read_string(&Path::new("applicant.name.first")),
            Some("Alice".to_string())
        );

        let persisted = applicants
            .lookup(applicant.id().unwrap())
            .await
            .unwrap()
            .unwrap();
        let json = persisted.data().as_json_string();
        assert!(json.contains("Alice"));
        assert!(json.contains("Doe"));
    }

    #[tokio::test]
    async fn test_update_outside_block_is_rejected_and_nothing_persists() {
        let (service, applicants) = service_with(test_program());
        let applicant = service.create_applicant(1).await.unwrap();

        let updates = vec![
            Update::new(Path::new("applicant.name.first"), "Alice"),
            Update::new(Path::new("applicant.favorite_color"), "blue"),
        ];

        let result = service
            .stage_and_update_if_valid(applicant.id().unwrap(), 1, 1, &updates)
            .await;
        match result {
            Err(ApplicantServiceError::InvalidUpdates(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(matches!(errors[0], UpdateError::PathNotInBlock(_)));
            }
            other => panic!("Expected InvalidUpdates, got {:?}", other.map(|_| ())),
        }

        // The valid half of the batch must not have been written either
        let persisted = applicants
            .lookup(applicant.id().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!persisted.data().as_json_string().contains("Alice"));
    }

    #[tokio::test]
    async fn test_update_unknown_applicant() {
        let (service, _) = service_with(test_program());
        let result = service
            .stage_and_update_if_valid(99, 1, 1, &[])
            .await;
        assert!(matches!(
            result,
            Err(ApplicantServiceError::ApplicantNotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_program_and_block() {
        let (service, _) = service_with(test_program());
        let applicant = service.create_applicant(1).await.unwrap();

        let result = service
            .stage_and_update_if_valid(applicant.id().unwrap(), 99, 1, &[])
            .await;
        assert!(matches!(
            result,
            Err(ApplicantServiceError::ProgramNotFound(99))
        ));

        let result = service
            .stage_and_update_if_valid(applicant.id().unwrap(), 1, 99, &[])
            .await;
        assert!(matches!(
            result,
            Err(ApplicantServiceError::BlockNotFound { block: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_get_read_only_applicant_program_service() {
        let (service, _) = service_with(test_program());
        let applicant = service.create_applicant(1).await.unwrap();

        let read_only = service
            .get_read_only_applicant_program_service(applicant.id().unwrap(), 1)
            .await
            .unwrap();
        assert_eq!(read_only.block_list().len(), 1);
        assert_eq!(read_only.first_incomplete_block().unwrap().id(), 1);
    }
}
