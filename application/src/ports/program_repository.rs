//! Program repository port

use crate::ports::RepositoryError;
use async_trait::async_trait;
use uniapp_domain::ProgramDefinition;

/// Persistence port for [`ProgramDefinition`] records.
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Insert a new program and return it with its assigned id.
    async fn insert(&self, program: ProgramDefinition)
    -> Result<ProgramDefinition, RepositoryError>;

    /// Rewrite an existing program (name, description, block structure).
    async fn update(&self, program: &ProgramDefinition) -> Result<(), RepositoryError>;

    /// Look up one program by id. Absence is `Ok(None)`.
    async fn lookup(&self, id: i64) -> Result<Option<ProgramDefinition>, RepositoryError>;

    /// Look up one program by its unique name.
    async fn lookup_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProgramDefinition>, RepositoryError>;

    /// All programs, in id order.
    async fn list(&self) -> Result<Vec<ProgramDefinition>, RepositoryError>;
}
