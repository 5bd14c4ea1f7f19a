//! Schema creation and migration.
//!
//! Migrations are keyed on `PRAGMA user_version` and are idempotent: each
//! step only runs when the stored version is older, and column additions are
//! guarded by `PRAGMA table_info`.

use crate::persistence::storage_err;
use rusqlite::Connection;
use std::collections::HashSet;
use tracing::debug;
use uniapp_application::RepositoryError;

/// Current schema version written to `user_version` after migration.
pub(crate) const SCHEMA_VERSION: i64 = 2;

/// Bring the database up to [`SCHEMA_VERSION`].
pub(crate) fn migrate(conn: &Connection) -> Result<(), RepositoryError> {
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(storage_err)?;

    if version < 1 {
        debug!("Creating initial schema");
        create_tables(conn)?;
    }
    if version < 2 {
        debug!("Migrating schema to v2");
        migrate_v2(conn)?;
    }

    if version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(storage_err)?;
    }
    Ok(())
}

fn create_tables(conn: &Connection) -> Result<(), RepositoryError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS applicants (
             id         INTEGER PRIMARY KEY AUTOINCREMENT,
             object     TEXT NOT NULL,
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS programs (
             id                INTEGER PRIMARY KEY AUTOINCREMENT,
             name              TEXT NOT NULL UNIQUE,
             description       TEXT NOT NULL DEFAULT '',
             block_definitions TEXT NOT NULL DEFAULT '[]',
             created_at        TEXT NOT NULL,
             updated_at        TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS questions (
             id                 INTEGER PRIMARY KEY AUTOINCREMENT,
             version            INTEGER NOT NULL DEFAULT 1,
             name               TEXT NOT NULL,
             description        TEXT NOT NULL DEFAULT '',
             path               TEXT NOT NULL UNIQUE,
             question_type      TEXT NOT NULL,
             question_text      TEXT NOT NULL DEFAULT '{}',
             question_help_text TEXT NOT NULL DEFAULT '{}',
             created_at         TEXT NOT NULL
         );",
    )
    .map_err(storage_err)
}

/// v2: applicants gained an owning account.
fn migrate_v2(conn: &Connection) -> Result<(), RepositoryError> {
    let cols = table_columns(conn, "applicants")?;
    add_column_if_missing(conn, &cols, "applicants", "account_id", "INTEGER NOT NULL DEFAULT 0")
}

pub(crate) fn table_columns(
    conn: &Connection,
    table: &str,
) -> Result<HashSet<String>, RepositoryError> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", table))
        .map_err(storage_err)?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(storage_err)?;
    let mut out = HashSet::new();
    for r in rows {
        out.insert(r.map_err(storage_err)?);
    }
    Ok(out)
}

pub(crate) fn add_column_if_missing(
    conn: &Connection,
    cols: &HashSet<String>,
    table: &str,
    col: &str,
    ty: &str,
) -> Result<(), RepositoryError> {
    if !cols.contains(col) {
        let sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, col, ty);
        conn.execute(&sql, []).map_err(storage_err)?;
    }
    Ok(())
}
