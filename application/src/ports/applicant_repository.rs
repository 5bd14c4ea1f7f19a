//! Applicant repository port

use crate::ports::RepositoryError;
use async_trait::async_trait;
use uniapp_domain::Applicant;

/// Persistence port for [`Applicant`] records.
///
/// Implementations live in the infrastructure layer (SQLite in production,
/// in-memory mocks in service tests).
#[async_trait]
pub trait ApplicantRepository: Send + Sync {
    /// Insert a new applicant and return it with its assigned id.
    async fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError>;

    /// Rewrite an existing applicant's data.
    ///
    /// Fails with [`RepositoryError::NotFound`] when the applicant has no id
    /// or no row exists for it.
    async fn update(&self, applicant: &Applicant) -> Result<(), RepositoryError>;

    /// Look up one applicant by id. Absence is `Ok(None)`.
    async fn lookup(&self, id: i64) -> Result<Option<Applicant>, RepositoryError>;

    /// All applicants, in id order.
    async fn list(&self) -> Result<Vec<Applicant>, RepositoryError>;
}
