//! SQLite-backed applicant repository.

use crate::persistence::rows::ApplicantRow;
use crate::persistence::{Database, lock_conn, storage_err};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Arc, Mutex};
use uniapp_application::{ApplicantRepository, RepositoryError};
use uniapp_domain::Applicant;

/// [`ApplicantRepository`] over the shared SQLite connection.
pub struct SqliteApplicantRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteApplicantRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            conn: db.connection(),
        }
    }
}

#[async_trait]
impl ApplicantRepository for SqliteApplicantRepository {
    async fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            "INSERT INTO applicants (account_id, object, created_at, updated_at)
             VALUES (?1, ?2, datetime('now'), datetime('now'))",
            params![applicant.account_id(), applicant.data().as_json_string()],
        )
        .map_err(storage_err)?;
        let id = conn.last_insert_rowid();
        Ok(Applicant::with_id(
            id,
            applicant.account_id(),
            applicant.data().clone(),
        ))
    }

    async fn update(&self, applicant: &Applicant) -> Result<(), RepositoryError> {
        let id = applicant
            .id()
            .ok_or_else(|| RepositoryError::NotFound("applicant without id".to_string()))?;
        let conn = lock_conn(&self.conn)?;
        let changed = conn
            .execute(
                "UPDATE applicants
                 SET account_id = ?1, object = ?2, updated_at = datetime('now')
                 WHERE id = ?3",
                params![applicant.account_id(), applicant.data().as_json_string(), id],
            )
            .map_err(storage_err)?;
        if changed == 0 {
            return Err(RepositoryError::NotFound(format!("applicant {}", id)));
        }
        Ok(())
    }

    async fn lookup(&self, id: i64) -> Result<Option<Applicant>, RepositoryError> {
        let conn = lock_conn(&self.conn)?;
        let row = conn
            .query_row(
                "SELECT id, account_id, object FROM applicants WHERE id = ?1",
                params![id],
                |row| {
                    Ok(ApplicantRow {
                        id: row.get(0)?,
                        account_id: row.get(1)?,
                        object: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(storage_err)?;
        row.map(ApplicantRow::into_domain).transpose()
    }

    async fn list(&self) -> Result<Vec<Applicant>, RepositoryError> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn
            .prepare("SELECT id, account_id, object FROM applicants ORDER BY id ASC")
            .map_err(storage_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ApplicantRow {
                    id: row.get(0)?,
                    account_id: row.get(1)?,
                    object: row.get(2)?,
                })
            })
            .map_err(storage_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage_err)?;
        rows.into_iter().map(ApplicantRow::into_domain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniapp_domain::Path;

    fn repo() -> SqliteApplicantRepository {
        SqliteApplicantRepository::new(&Database::in_memory().unwrap())
    }

    async fn save_applicant(repo: &SqliteApplicantRepository, name: &str) -> Applicant {
        let mut applicant = Applicant::new(1);
        applicant
            .data_mut()
            .put_string(&Path::new("applicant.name"), name)
            .unwrap();
        repo.insert(applicant).await.unwrap()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = repo();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_returns_all_applicants() {
        let repo = repo();
        let one = save_applicant(&repo, "one").await;
        let two = save_applicant(&repo, "two").await;

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![one, two]);
    }

    #[tokio::test]
    async fn test_lookup_returns_none_when_applicant_not_found() {
        let repo = repo();
        assert_eq!(repo.lookup(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_lookup_finds_correct_applicant() {
        let repo = repo();
        save_applicant(&repo, "Alice").await;
        let two = save_applicant(&repo, "Bob").await;

        let found = repo.lookup(two.id().unwrap()).await.unwrap();
        assert_eq!(found, Some(two));
    }

    #[tokio::test]
    async fn test_insert_round_trips_applicant_data() {
        let repo = repo();
        let path = Path::new("$.applicant.birthdate");
        let mut applicant = Applicant::new(1);
        applicant.data_mut().put_string(&path, "1/1/2021").unwrap();

        let inserted = repo.insert(applicant).await.unwrap();
        let id = inserted.id().unwrap();

        let found = repo.lookup(id).await.unwrap().unwrap();
        assert_eq!(found.id(), Some(id));
        assert_eq!(found.data().read_string(&path), Some("1/1/2021".to_string()));
    }

    #[tokio::test]
    async fn test_update_rewrites_applicant_data() {
        let repo = repo();
        let mut applicant = repo.insert(Applicant::new(1)).await.unwrap();
        let path = Path::new("$.applicant.birthdate");
        applicant.data_mut().put_string(&path, "1/1/2021").unwrap();

        repo.update(&applicant).await.unwrap();

        let found = repo.lookup(applicant.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.data().read_string(&path), Some("1/1/2021".to_string()));
    }

    #[tokio::test]
    async fn test_update_missing_applicant_is_not_found() {
        let repo = repo();
        let ghost = Applicant::with_id(42, 1, uniapp_domain::ApplicantData::new());
        let result = repo.update(&ghost).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }
}
