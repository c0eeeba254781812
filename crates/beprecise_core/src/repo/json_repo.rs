//! JSON file document repository.
//!
//! # Responsibility
//! - Store each document as one human-readable JSON file.
//!
//! # Invariants
//! - A missing file reads as "never written", not as an error.
//! - Parent directories are created on first write.

use crate::repo::document_repo::{DocumentKind, DocumentRepository, RepoError, RepoResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default task document file name.
pub const TASK_FILE_NAME: &str = "data.json";
/// Default schedule document file name.
pub const SCHEDULE_FILE_NAME: &str = "planner_data.json";

/// Document repository backed by two JSON files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileRepository {
    task_path: PathBuf,
    schedule_path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(task_path: impl Into<PathBuf>, schedule_path: impl Into<PathBuf>) -> Self {
        Self {
            task_path: task_path.into(),
            schedule_path: schedule_path.into(),
        }
    }

    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(TASK_FILE_NAME), dir.join(SCHEDULE_FILE_NAME))
    }

    pub fn path_for(&self, kind: DocumentKind) -> &Path {
        match kind {
            DocumentKind::Tasks => &self.task_path,
            DocumentKind::Schedule => &self.schedule_path,
        }
    }
}

impl DocumentRepository for JsonFileRepository {
    fn read_document(&self, kind: DocumentKind) -> RepoResult<Option<String>> {
        let path = self.path_for(kind);
        match fs::read_to_string(path) {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(RepoError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn write_document(&self, kind: DocumentKind, body: &str) -> RepoResult<()> {
        let path = self.path_for(kind);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RepoError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, body).map_err(|source| RepoError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
