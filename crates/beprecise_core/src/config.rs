//! Runtime configuration for storage and logging.
//!
//! # Responsibility
//! - Resolve data directory, storage backend and log settings from the
//!   environment, with per-platform defaults.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolved directories are absolute, so they can be handed to
//!   `init_logging` unchanged.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use crate::repo::json_repo::{JsonFileRepository, SCHEDULE_FILE_NAME, TASK_FILE_NAME};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "BEPRECISE_DATA_DIR";
pub const ENV_BACKEND: &str = "BEPRECISE_BACKEND";
pub const ENV_LOG_LEVEL: &str = "BEPRECISE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BEPRECISE_LOG_DIR";

const APP_DIR_NAME: &str = "beprecise";
const SQLITE_FILE_NAME: &str = "beprecise.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Where documents are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Two pretty-printed JSON files.
    #[default]
    Json,
    /// One SQLite database with a `documents` table.
    Sqlite,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownBackend(String),
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBackend(value) => {
                write!(f, "unknown storage backend `{value}`; expected json|sqlite")
            }
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownBackend(_) => None,
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// - `UnknownBackend` for a backend other than `json|sqlite`.
    /// - `Logging` for an unsupported log level.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let data_dir = value(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let backend = match value(ENV_BACKEND) {
            Some(raw) => {
                StorageBackend::parse(&raw).ok_or(ConfigError::UnknownBackend(raw))?
            }
            None => StorageBackend::default(),
        };
        let log_level = match value(ENV_LOG_LEVEL) {
            Some(raw) => normalize_level(&raw)?,
            None => default_log_level(),
        };
        let log_dir = value(ENV_LOG_DIR).map(PathBuf::from);

        Ok(Self::new(data_dir, backend, log_level, log_dir))
    }

    /// Builds a configuration rooted at `data_dir`.
    ///
    /// Relative paths are resolved against the current directory; the log
    /// directory defaults to `<data_dir>/logs`.
    pub fn new(
        data_dir: impl Into<PathBuf>,
        backend: StorageBackend,
        log_level: &'static str,
        log_dir: Option<PathBuf>,
    ) -> Self {
        let data_dir = absolutize(data_dir.into());
        let log_dir = log_dir
            .map(absolutize)
            .unwrap_or_else(|| data_dir.join(LOG_DIR_NAME));
        Self {
            data_dir,
            backend,
            log_level,
            log_dir,
        }
    }

    pub fn task_file(&self) -> PathBuf {
        self.data_dir.join(TASK_FILE_NAME)
    }

    pub fn schedule_file(&self) -> PathBuf {
        self.data_dir.join(SCHEDULE_FILE_NAME)
    }

    pub fn sqlite_file(&self) -> PathBuf {
        self.data_dir.join(SQLITE_FILE_NAME)
    }

    /// JSON repository over this configuration's document files.
    pub fn json_repository(&self) -> JsonFileRepository {
        JsonFileRepository::new(self.task_file(), self.schedule_file())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}
