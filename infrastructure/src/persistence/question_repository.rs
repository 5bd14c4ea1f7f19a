//! SQLite-backed question repository.

use crate::persistence::rows::QuestionRow;
use crate::persistence::{Database, lock_conn, storage_err};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::sync::{Arc, Mutex};
use uniapp_application::{QuestionRepository, RepositoryError};
use uniapp_domain::{Path, QuestionDefinition};

/// [`QuestionRepository`] over the shared SQLite connection.
pub struct SqliteQuestionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteQuestionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            conn: db.connection(),
        }
    }

    fn row(row: &Row<'_>) -> Result<QuestionRow, rusqlite::Error> {
        Ok(QuestionRow {
            id: row.get(0)?,
            version: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            path: row.get(4)?,
            question_type: row.get(5)?,
            question_text: row.get(6)?,
            question_help_text: row.get(7)?,
        })
    }
}

const SELECT: &str = "SELECT id, version, name, description, path, question_type, \
                      question_text, question_help_text FROM questions";

#[async_trait]
impl QuestionRepository for SqliteQuestionRepository {
    async fn insert(
        &self,
        question: QuestionDefinition,
    ) -> Result<QuestionDefinition, RepositoryError> {
        let text = QuestionRow::text_json(question.question_text())?;
        let help = QuestionRow::text_json(question.question_help_text())?;
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            "INSERT INTO questions
                 (version, name, description, path, question_type,
                  question_text, question_help_text, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now'))",
            params![
                question.version(),
                question.name(),
                question.description(),
                question.path().as_str(),
                question.question_type().to_string(),
                text,
                help,
            ],
        )
        .map_err(storage_err)?;
        let id = conn.last_insert_rowid();
        Ok(question.with_id(id))
    }

    async fn lookup(&self, id: i64) -> Result<Option<QuestionDefinition>, RepositoryError> {
        let conn = lock_conn(&self.conn)?;
        let row = conn
            .query_row(&format!("{} WHERE id = ?1", SELECT), params![id], Self::row)
            .optional()
            .map_err(storage_err)?;
        row.map(QuestionRow::into_domain).transpose()
    }

    async fn lookup_by_path(
        &self,
        path: &Path,
    ) -> Result<Option<QuestionDefinition>, RepositoryError> {
        let conn = lock_conn(&self.conn)?;
        let row = conn
            .query_row(
                &format!("{} WHERE path = ?1", SELECT),
                params![path.as_str()],
                Self::row,
            )
            .optional()
            .map_err(storage_err)?;
        row.map(QuestionRow::into_domain).transpose()
    }

    async fn list(&self) -> Result<Vec<QuestionDefinition>, RepositoryError> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT))
            .map_err(storage_err)?;
        let rows = stmt
            .query_map([], Self::row)
            .map_err(storage_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage_err)?;
        rows.into_iter().map(QuestionRow::into_domain).collect()
    }
}
