//! Question repository port

use crate::ports::RepositoryError;
use async_trait::async_trait;
use uniapp_domain::{Path, QuestionDefinition};

/// Persistence port for [`QuestionDefinition`] records.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a new question and return it with its assigned id.
    async fn insert(
        &self,
        question: QuestionDefinition,
    ) -> Result<QuestionDefinition, RepositoryError>;

    /// Look up one question by id. Absence is `Ok(None)`.
    async fn lookup(&self, id: i64) -> Result<Option<QuestionDefinition>, RepositoryError>;

    /// Look up one question by its exact path.
    async fn lookup_by_path(
        &self,
        path: &Path,
    ) -> Result<Option<QuestionDefinition>, RepositoryError>;

    /// All questions, in id order.
    async fn list(&self) -> Result<Vec<QuestionDefinition>, RepositoryError>;
}
