//! Core domain logic for BePrecise task budgets and day plans.
//! This crate is the single source of truth for business invariants; the
//! presentation layer issues commands against the stores and re-renders from
//! the state they return.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig, StorageBackend};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date::{format_iso_date, parse_iso_date};
pub use model::schedule::{
    slot_key, DayAllocation, DaySchedule, Schedule, Slot, SlotDuration, DAY_BUDGET_MINUTES,
    HOURS_PER_DAY,
};
pub use model::task::{Cadence, Task, TaskMap};
pub use model::validation::ValidationError;
pub use repo::document_repo::{DocumentKind, DocumentRepository, RepoError, RepoResult};
pub use repo::json_repo::JsonFileRepository;
pub use repo::sqlite_repo::SqliteDocumentRepository;
pub use service::distributor::distribute;
pub use service::error::{StoreError, StoreResult};
pub use service::migration::{migrate, TaskRecord};
pub use service::schedule_store::ScheduleStore;
pub use service::summary::{summarize, ProgressSummary, SummaryRow};
pub use service::task_store::TaskStore;
