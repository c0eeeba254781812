//! SQLite document repository.
//!
//! # Responsibility
//! - Store each document body as one row of the `documents` table.
//!
//! # Invariants
//! - The connection must come from `db::open_db*` so migrations are applied.
//! - Writes upsert by document name and bump `updated_at`.

use crate::repo::document_repo::{DocumentKind, DocumentRepository, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Document repository over a borrowed SQLite connection.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn read_document(&self, kind: DocumentKind) -> RepoResult<Option<String>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE name = ?1;",
                [kind.name()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(body)
    }

    fn write_document(&self, kind: DocumentKind, body: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO documents (name, body) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET
                body = excluded.body,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![kind.name(), body],
        )?;
        Ok(())
    }
}
