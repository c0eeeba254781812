//! Task record migration from legacy document shapes.
//!
//! # Responsibility
//! - Classify each stored record as `Current` or `Legacy`.
//! - Transform any record into the current `Task` shape with documented
//!   defaults, recomputing the cached daily target when it is missing.
//!
//! # Invariants
//! - `migrate` is idempotent: migrating a migrated record returns it unchanged.
//! - One malformed record never discards the rest of the document.

use crate::model::date::parse_iso_date;
use crate::model::task::{Cadence, Task, TaskMap};
use crate::service::distributor::distribute;
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Record written by older versions: any field may be missing, and the total
/// may still be stored under `minutes`. Minute counts may be fractional and
/// are rounded up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LegacyTaskRecord {
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub minutes: Option<i64>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub total_minutes: Option<i64>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub daily_minutes: Option<i64>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub completed_minutes: Option<i64>,
    pub deadline: Option<String>,
    #[serde(rename = "type")]
    pub cadence: Option<String>,
    pub completed: Option<bool>,
    pub created: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredMinutes {
    Whole(i64),
    Fractional(f64),
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = Option::<StoredMinutes>::deserialize(deserializer)?;
    Ok(minutes.map(|minutes| match minutes {
        StoredMinutes::Whole(value) => value,
        // `as` saturates out-of-range floats and maps NaN to 0.
        StoredMinutes::Fractional(value) => value.ceil() as i64,
    }))
}

/// A stored task record, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRecord {
    Current(Task),
    Legacy(LegacyTaskRecord),
}

impl TaskRecord {
    /// Classifies a raw JSON record.
    ///
    /// # Errors
    /// Returns the decode error when the value fits neither shape (not an
    /// object, or fields of the wrong JSON type).
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match serde_json::from_value::<Task>(value.clone()) {
            Ok(task) => Ok(Self::Current(task)),
            Err(_) => serde_json::from_value::<LegacyTaskRecord>(value).map(Self::Legacy),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

/// Brings one record to the current shape.
///
/// Defaults: `total_minutes=0`, `daily_minutes=0`, `completed_minutes=0`,
/// `completed=false`, `type=Daily`, `created=today`, `deadline=today`. A zero
/// `daily_minutes` is recomputed from cadence, total and deadline.
pub fn migrate(record: TaskRecord, today: NaiveDate) -> Task {
    let mut task = match record {
        TaskRecord::Current(task) => task,
        TaskRecord::Legacy(legacy) => upgrade_legacy(legacy, today),
    };
    if task.daily_minutes == 0 {
        task.daily_minutes = distribute(task.cadence, task.total_minutes, task.deadline, today);
    }
    task
}

/// Migrates every record of a task document, keeping document order.
///
/// Records that cannot be decoded, or that are stored under an empty title,
/// are skipped and logged.
pub fn migrate_document(document: Map<String, Value>, today: NaiveDate) -> TaskMap {
    let mut tasks = TaskMap::new();
    let mut legacy = 0_usize;
    let mut skipped = 0_usize;

    for (title, value) in document {
        if title.trim().is_empty() {
            skipped += 1;
            warn!("event=task_migrate module=migration status=skipped reason=empty_title");
            continue;
        }
        match TaskRecord::from_value(value) {
            Ok(record) => {
                if record.is_legacy() {
                    legacy += 1;
                }
                tasks.insert(title, migrate(record, today));
            }
            Err(err) => {
                skipped += 1;
                warn!(
                    "event=task_migrate module=migration status=skipped reason=undecodable error={}",
                    err
                );
            }
        }
    }

    if legacy > 0 || skipped > 0 {
        info!(
            "event=task_migrate module=migration status=ok loaded={} legacy={} skipped={}",
            tasks.len(),
            legacy,
            skipped
        );
    }
    tasks
}

fn upgrade_legacy(legacy: LegacyTaskRecord, today: NaiveDate) -> Task {
    let total_minutes = legacy.total_minutes.or(legacy.minutes).unwrap_or(0);
    let cadence = match legacy.cadence.as_deref() {
        None => Cadence::Daily,
        Some(label) => Cadence::parse(label).unwrap_or_else(|| {
            warn!("event=task_migrate module=migration status=defaulted field=type");
            Cadence::Daily
        }),
    };

    Task {
        total_minutes,
        daily_minutes: legacy.daily_minutes.unwrap_or(0),
        completed_minutes: legacy.completed_minutes.unwrap_or(0),
        deadline: date_or_today(legacy.deadline.as_deref(), "deadline", today),
        cadence,
        completed: legacy.completed.unwrap_or(false),
        created: date_or_today(legacy.created.as_deref(), "created", today),
    }
}

fn date_or_today(value: Option<&str>, field: &str, today: NaiveDate) -> NaiveDate {
    match value {
        None => today,
        Some(text) => parse_iso_date(text).unwrap_or_else(|| {
            warn!("event=task_migrate module=migration status=defaulted field={field}");
            today
        }),
    }
}
