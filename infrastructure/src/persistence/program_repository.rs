//! SQLite-backed program repository.
//!
//! Block structure is stored denormalized as a JSON column — programs are
//! read whole and rewritten whole, which matches how the services edit them.

use crate::persistence::rows::ProgramRow;
use crate::persistence::{Database, lock_conn, storage_err};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::sync::{Arc, Mutex};
use uniapp_application::{ProgramRepository, RepositoryError};
use uniapp_domain::ProgramDefinition;

/// [`ProgramRepository`] over the shared SQLite connection.
pub struct SqliteProgramRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProgramRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            conn: db.connection(),
        }
    }

    fn row(row: &Row<'_>) -> Result<ProgramRow, rusqlite::Error> {
        Ok(ProgramRow {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            block_definitions: row.get(3)?,
        })
    }
}

#[async_trait]
impl ProgramRepository for SqliteProgramRepository {
    async fn insert(
        &self,
        program: ProgramDefinition,
    ) -> Result<ProgramDefinition, RepositoryError> {
        let blocks = ProgramRow::blocks_json(&program)?;
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            "INSERT INTO programs (name, description, block_definitions, created_at, updated_at)
             VALUES (?1, ?2, ?3, datetime('now'), datetime('now'))",
            params![program.name(), program.description(), blocks],
        )
        .map_err(storage_err)?;
        let id = conn.last_insert_rowid();
        Ok(program.with_id(id))
    }

    async fn update(&self, program: &ProgramDefinition) -> Result<(), RepositoryError> {
        let id = program
            .id()
            .ok_or_else(|| RepositoryError::NotFound("program without id".to_string()))?;
        let blocks = ProgramRow::blocks_json(program)?;
        let conn = lock_conn(&self.conn)?;
        let changed = conn
            .execute(
                "UPDATE programs
                 SET name = ?1, description = ?2, block_definitions = ?3,
                     updated_at = datetime('now')
                 WHERE id = ?4",
                params![program.name(), program.description(), blocks, id],
            )
            .map_err(storage_err)?;
        if changed == 0 {
            return Err(RepositoryError::NotFound(format!("program {}", id)));
        }
        Ok(())
    }

    async fn lookup(&self, id: i64) -> Result<Option<ProgramDefinition>, RepositoryError> {
        let conn = lock_conn(&self.conn)?;
        let row = conn
            .query_row(
                "SELECT id, name, description, block_definitions FROM programs WHERE id = ?1",
                params![id],
                Self::row,
            )
            .optional()
            .map_err(storage_err)?;
        row.map(ProgramRow::into_domain).transpose()
    }

    async fn lookup_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProgramDefinition>, RepositoryError> {
        let conn = lock_conn(&self.conn)?;
        let row = conn
            .query_row(
                "SELECT id, name, description, block_definitions FROM programs WHERE name = ?1",
                params![name],
                Self::row,
            )
            .optional()
            .map_err(storage_err)?;
        row.map(ProgramRow::into_domain).transpose()
    }

    async fn list(&self) -> Result<Vec<ProgramDefinition>, RepositoryError> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, description, block_definitions FROM programs ORDER BY id ASC",
            )
            .map_err(storage_err)?;
        let rows = stmt
            .query_map([], Self::row)
            .map_err(storage_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage_err)?;
        rows.into_iter().map(ProgramRow::into_domain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniapp_domain::{
        LocalizedText, Path, ProgramQuestionDefinition, QuestionDefinition, QuestionType,
    };

    fn repo() -> SqliteProgramRepository {
        SqliteProgramRepository::new(&Database::in_memory().unwrap())
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let repo = repo();
        let program = repo
            .insert(ProgramDefinition::new("test program", "desc"))
            .await
            .unwrap();
        assert_eq!(program.id(), Some(1));
    }

    #[tokio::test]
    async fn test_lookup_missing_is_none() {
        let repo = repo();
        assert!(repo.lookup(9).await.unwrap().is_none());
        assert!(repo.lookup_by_name("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blocks_round_trip() {
        let repo = repo();
        let mut program = repo
            .insert(ProgramDefinition::new("test program", "desc"))
            .await
            .unwrap();
        program.add_block("test block", "test block description");

        let question = QuestionDefinition::new(
            "my name",
            Path::new("applicant.name"),
            "description",
            LocalizedText::of("question?"),
            LocalizedText::of("help text"),
            QuestionType::Name,
        )
        .with_id(1);
        program
            .block_mut(1)
            .unwrap()
            .set_program_question_definitions(vec![ProgramQuestionDefinition::new(question)]);

        repo.update(&program).await.unwrap();

        let found = repo.lookup(program.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found, program);
        assert_eq!(
            found.block(1).unwrap().program_question_definitions()[0]
                .question()
                .name(),
            "my name"
        );
    }

    #[tokio::test]
    async fn test_lookup_by_name() {
        let repo = repo();
        repo.insert(ProgramDefinition::new("food assistance", ""))
            .await
            .unwrap();
        let found = repo.lookup_by_name("food assistance").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_storage_error() {
        let repo = repo();
        repo.insert(ProgramDefinition::new("test program", ""))
            .await
            .unwrap();
        let result = repo.insert(ProgramDefinition::new("test program", "")).await;
        assert!(matches!(result, Err(RepositoryError::Storage(_))));
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let repo = repo();
        repo.insert(ProgramDefinition::new("a", "")).await.unwrap();
        repo.insert(ProgramDefinition::new("b", "")).await.unwrap();
        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
