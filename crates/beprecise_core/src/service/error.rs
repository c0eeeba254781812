//! Error taxonomy of the task and schedule stores.

use crate::model::validation::ValidationError;
use crate::repo::document_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation failure.
///
/// `Validation` and `NotFound` leave store state untouched. `Storage` means
/// the in-memory mutation happened but could not be persisted.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    /// No task with this title.
    NotFound(String),
    Storage(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(title) => write!(f, "task not found: `{title}`"),
            Self::Storage(err) => write!(f, "failed to save: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}
