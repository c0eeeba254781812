//! Document repository contract shared by the task and schedule stores.
//!
//! # Responsibility
//! - Name the two durable documents and the error type for reading/writing them.
//! - Encode/decode document bodies as pretty-printed JSON.
//!
//! # Invariants
//! - Every write replaces the whole document; there are no partial updates.
//! - Reads distinguish "absent" (`Ok(None)`) from transport failure (`Err`).
//! - Corrupt bodies are reported to the caller of `read_json_document` as
//!   `None` and logged, never as an error.

use crate::db::DbError;
use log::warn;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// The two independently persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Title-keyed task records.
    Tasks,
    /// Date-keyed hourly day plans.
    Schedule,
}

impl DocumentKind {
    /// Stable storage name (SQLite row key, log field).
    pub fn name(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Schedule => "schedule",
        }
    }
}

/// Storage-level failure while reading or writing a document.
#[derive(Debug)]
pub enum RepoError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable storage for whole documents.
pub trait DocumentRepository {
    /// Returns the raw document body, or `None` when it was never written.
    fn read_document(&self, kind: DocumentKind) -> RepoResult<Option<String>>;
    /// Replaces the document body.
    fn write_document(&self, kind: DocumentKind, body: &str) -> RepoResult<()>;
}

impl<T: DocumentRepository + ?Sized> DocumentRepository for &T {
    fn read_document(&self, kind: DocumentKind) -> RepoResult<Option<String>> {
        (**self).read_document(kind)
    }

    fn write_document(&self, kind: DocumentKind, body: &str) -> RepoResult<()> {
        (**self).write_document(kind, body)
    }
}

/// Reads a document as a JSON object.
///
/// Returns `None` when the document is absent, unreadable, not valid JSON,
/// or not a JSON object. Everything except absence is logged at warn level:
/// callers proceed with empty state.
pub fn read_json_document<R: DocumentRepository + ?Sized>(
    repo: &R,
    kind: DocumentKind,
) -> Option<serde_json::Map<String, Value>> {
    let body = match repo.read_document(kind) {
        Ok(Some(body)) => body,
        Ok(None) => return None,
        Err(err) => {
            warn!(
                "event=document_read module=repo status=error document={} error_code=read_failed error={}",
                kind.name(),
                err
            );
            return None;
        }
    };

    if body.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => {
            warn!(
                "event=document_read module=repo status=corrupt document={} error_code=not_an_object",
                kind.name()
            );
            None
        }
        Err(err) => {
            warn!(
                "event=document_read module=repo status=corrupt document={} error_code=invalid_json error={}",
                kind.name(),
                err
            );
            None
        }
    }
}

/// Encodes `value` as two-space indented JSON and replaces the document.
pub fn write_json_document<R: DocumentRepository + ?Sized, T: Serialize + ?Sized>(
    repo: &R,
    kind: DocumentKind,
    value: &T,
) -> RepoResult<()> {
    let body = serde_json::to_string_pretty(value).map_err(RepoError::Encode)?;
    repo.write_document(kind, &body)
}

#[cfg(test)]
mod tests {
    use super::{
        read_json_document, write_json_document, DocumentKind, DocumentRepository, RepoResult,
    };
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryRepo {
        docs: RefCell<HashMap<DocumentKind, String>>,
    }

    impl DocumentRepository for MemoryRepo {
        fn read_document(&self, kind: DocumentKind) -> RepoResult<Option<String>> {
            Ok(self.docs.borrow().get(&kind).cloned())
        }

        fn write_document(&self, kind: DocumentKind, body: &str) -> RepoResult<()> {
            self.docs.borrow_mut().insert(kind, body.to_string());
            Ok(())
        }
    }

    #[test]
    fn absent_blank_and_corrupt_documents_read_as_none() {
        let repo = MemoryRepo::default();
        assert!(read_json_document(&repo, DocumentKind::Tasks).is_none());

        repo.write_document(DocumentKind::Tasks, "   ").unwrap();
        assert!(read_json_document(&repo, DocumentKind::Tasks).is_none());

        repo.write_document(DocumentKind::Tasks, "{ not json").unwrap();
        assert!(read_json_document(&repo, DocumentKind::Tasks).is_none());

        repo.write_document(DocumentKind::Tasks, "[1, 2, 3]").unwrap();
        assert!(read_json_document(&repo, DocumentKind::Tasks).is_none());
    }

    #[test]
    fn written_documents_use_two_space_indent() {
        let repo = MemoryRepo::default();
        let value = serde_json::json!({ "2024-01-01": { "09:00": { "task": "Standup" } } });
        write_json_document(&repo, DocumentKind::Schedule, &value).unwrap();

        let body = repo
            .read_document(DocumentKind::Schedule)
            .unwrap()
            .unwrap();
        assert!(body.contains("\n  \"2024-01-01\""));
        assert!(read_json_document(&repo, DocumentKind::Schedule).is_some());
        assert!(read_json_document(&repo, DocumentKind::Tasks).is_none());
    }
}
