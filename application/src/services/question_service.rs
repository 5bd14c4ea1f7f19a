//! Question service.
//!
//! Administrators create questions here; applicant-facing code reads them
//! through the immutable [`ReadOnlyQuestionService`] snapshot.

use crate::ports::RepositoryError;
use crate::ports::audit_log::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::question_repository::QuestionRepository;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uniapp_domain::{DomainError, Path, QuestionDefinition};

/// Errors that can occur while managing questions.
#[derive(Error, Debug)]
pub enum QuestionServiceError {
    #[error("Question name cannot be empty")]
    EmptyName,

    #[error("Question path cannot be the root path")]
    RootPath,

    #[error("A question already exists at path '{0}'")]
    DuplicatePath(Path),

    #[error("Path '{path}' conflicts with existing question path '{existing}'")]
    PathConflict { path: Path, existing: Path },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Service for creating and reading question definitions.
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    audit: Arc<dyn AuditLogger>,
}

impl QuestionService {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            questions,
            audit: Arc::new(NoAuditLogger),
        }
    }

    /// Create with an audit logger.
    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Validate and persist a new question.
    ///
    /// A question's path must not equal an existing question's path, nor be
    /// an ancestor or descendant of one — each question owns its subtree of
    /// the applicant document exclusively.
    pub async fn create(
        &self,
        question: QuestionDefinition,
    ) -> Result<QuestionDefinition, QuestionServiceError> {
        if question.name().trim().is_empty() {
            return Err(QuestionServiceError::EmptyName);
        }
        if question.path().is_root() {
            return Err(QuestionServiceError::RootPath);
        }

        for existing in self.questions.list().await? {
            if existing.path() == question.path() {
                return Err(QuestionServiceError::DuplicatePath(question.path().clone()));
            }
            if question.path().starts_with(existing.path())
                || existing.path().starts_with(question.path())
            {
                return Err(QuestionServiceError::PathConflict {
                    path: question.path().clone(),
                    existing: existing.path().clone(),
                });
            }
        }

        let created = self.questions.insert(question).await?;
        info!(
            "Created question '{}' at path {}",
            created.name(),
            created.path()
        );
        self.audit.log(AuditEvent::new(
            "question_created",
            serde_json::json!({
                "id": created.id(),
                "name": created.name(),
                "path": created.path().as_str(),
                "type": created.question_type().to_string(),
            }),
        ));
        Ok(created)
    }

    /// One question by id. Absence is `Ok(None)`.
    pub async fn get_question(
        &self,
        id: i64,
    ) -> Result<Option<QuestionDefinition>, QuestionServiceError> {
        Ok(self.questions.lookup(id).await?)
    }

    /// All questions, in id order.
    pub async fn list_questions(&self) -> Result<Vec<QuestionDefinition>, QuestionServiceError> {
        Ok(self.questions.list().await?)
    }

    /// Snapshot all questions into a read-only lookup service.
    pub async fn get_read_only_question_service(
        &self,
    ) -> Result<ReadOnlyQuestionService, QuestionServiceError> {
        Ok(ReadOnlyQuestionService::new(self.questions.list().await?))
    }
}

/// Immutable snapshot of the question bank, for path resolution.
pub struct ReadOnlyQuestionService {
    questions: Vec<QuestionDefinition>,
}

impl ReadOnlyQuestionService {
    pub fn new(questions: Vec<QuestionDefinition>) -> Self {
        Self { questions }
    }

    pub fn get_all(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    /// Resolve `path` to the question owning it — either the question's root
    /// path or one of its scalar leaves.
    pub fn get_by_path(&self, path: &Path) -> Result<&QuestionDefinition, DomainError> {
        self.questions
            .iter()
            .find(|q| q.path() == path || q.owns_scalar(path))
            .ok_or_else(|| DomainError::PathNotFound(path.clone()))
    }

    /// True when some question owns `path`.
    pub fn is_valid_path(&self, path: &Path) -> bool {
        self.get_by_path(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uniapp_domain::{LocalizedText, QuestionType};

    // ==================== Test Mocks ====================

    struct MockQuestionRepository {
        questions: Mutex<Vec<QuestionDefinition>>,
    }

    impl MockQuestionRepository {
        fn new() -> Self {
            Self {
                questions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QuestionRepository for MockQuestionRepository {
        async fn insert(
            &self,
            question: QuestionDefinition,
        ) -> Result<QuestionDefinition, RepositoryError> {
            let mut questions = self.questions.lock().unwrap();
            let id = questions.len() as i64 + 1;
            let question = question.with_id(id);
            questions.push(question.clone());
            Ok(question)
        }

        async fn lookup(&self, id: i64) -> Result<Option<QuestionDefinition>, RepositoryError> {
            Ok(self
                .questions
                .lock()
                .unwrap()
                .iter()
                .find(|q| q.id() == Some(id))
                .cloned())
        }

        async fn lookup_by_path(
            &self,
            path: &Path,
        ) -> Result<Option<QuestionDefinition>, RepositoryError> {
            Ok(self
                .questions
                .lock()
                .unwrap()
                .iter()
                .find(|q| q.path() == path)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<QuestionDefinition>, RepositoryError> {
            Ok(self.questions.lock().unwrap().clone())
        }
    }

    fn service() -> QuestionService {
        QuestionService::new(Arc::new(MockQuestionRepository::new()))
    }

    fn question(name: &str, path: &str, ty: QuestionType) -> QuestionDefinition {
        QuestionDefinition::new(
            name,
            Path::new(path),
            "description",
            LocalizedText::of("question?"),
            LocalizedText::of("help text"),
            ty,
        )
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_create_assigns_id() {
        let service = service();
        let created = service
            .create(question("my name", "applicant.name", QuestionType::Name))
            .await
            .unwrap();
        assert_eq!(created.id(), Some(1));
        assert_eq!(created.version(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let service = service();
        let result = service
            .create(question("   ", "applicant.name", QuestionType::Name))
            .await;
        assert!(matches!(result, Err(QuestionServiceError::EmptyName)));
    }

    #[tokio::test]
    async fn test_create_rejects_root_path() {
        let service = service();
        let result = service.create(question("bad", "$", QuestionType::Text)).await;
        assert!(matches!(result, Err(QuestionServiceError::RootPath)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_path() {
        let service = service();
        service
            .create(question("one", "applicant.color", QuestionType::Text))
            .await
            .unwrap();
        let result = service
            .create(question("two", "applicant.color", QuestionType::Text))
            .await;
        assert!(matches!(
            result,
            Err(QuestionServiceError::DuplicatePath(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_nested_paths() {
        let service = service();
        service
            .create(question("name", "applicant.name", QuestionType::Name))
            .await
            .unwrap();

        // Descendant of an existing question path
        let result = service
            .create(question("first", "applicant.name.first", QuestionType::Text))
            .await;
        assert!(matches!(result, Err(QuestionServiceError::PathConflict { .. })));

        // Ancestor of an existing question path
        let result = service.create(question("root", "applicant", QuestionType::Text)).await;
        assert!(matches!(result, Err(QuestionServiceError::PathConflict { .. })));
    }

    #[tokio::test]
    async fn test_sibling_paths_do_not_conflict() {
        let service = service();
        service
            .create(question("name", "applicant.name", QuestionType::Name))
            .await
            .unwrap();
        let result = service
            .create(question("address", "applicant.address", QuestionType::Address))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_read_only_service_resolves_scalar_paths() {
        let service = service();
        service
            .create(question("name", "applicant.name", QuestionType::Name))
            .await
            .unwrap();

        let read_only = service.get_read_only_question_service().await.unwrap();
        assert_eq!(read_only.get_all().len(), 1);

        // Root path and scalar leaf both resolve to the owning question
        let by_root = read_only.get_by_path(&Path::new("applicant.name")).unwrap();
        assert_eq!(by_root.name(), "name");
        let by_leaf = read_only
            .get_by_path(&Path::new("applicant.name.first"))
            .unwrap();
        assert_eq!(by_leaf.name(), "name");

        assert!(read_only.is_valid_path(&Path::new("applicant.name.last")));
        assert!(!read_only.is_valid_path(&Path::new("applicant.birthdate")));
    }

    #[tokio::test]
    async fn test_read_only_service_missing_path_error_message() {
        let read_only = ReadOnlyQuestionService::new(Vec::new());
        let err = read_only
            .get_by_path(&Path::new("applicant.birthdate"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Path not found: applicant.birthdate");
    }
}
