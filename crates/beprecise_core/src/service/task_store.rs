//! Task store: owned task map with a persisted mutation API.
//!
//! # Responsibility
//! - Load, migrate and hold the title-keyed task map.
//! - Validate and apply task commands, persisting after every mutation.
//! - Answer title searches for the presentation layer.
//!
//! # Invariants
//! - `Validation` and `NotFound` failures never change state.
//! - Every successful mutation rewrites the whole task document.
//! - Task titles and other user text are never written to logs.

use crate::clock::{Clock, SystemClock};
use crate::model::task::{Cadence, Task, TaskMap};
use crate::model::validation::{
    normalize_title, parse_date, validate_total_minutes, ValidationError,
};
use crate::repo::document_repo::{
    read_json_document, write_json_document, DocumentKind, DocumentRepository,
};
use crate::service::distributor::distribute;
use crate::service::error::{StoreError, StoreResult};
use crate::service::migration::migrate_document;
use log::{error, info};
use std::time::Instant;

/// Owned task map bound to a document repository.
pub struct TaskStore<R: DocumentRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    tasks: TaskMap,
}

impl<R: DocumentRepository> TaskStore<R> {
    /// Opens the store using the system date, loading the task document.
    pub fn open(repo: R) -> Self {
        Self::open_with_clock(repo, SystemClock)
    }
}

impl<R: DocumentRepository, C: Clock> TaskStore<R, C> {
    /// Opens the store with an explicit date source.
    pub fn open_with_clock(repo: R, clock: C) -> Self {
        let mut store = Self {
            repo,
            clock,
            tasks: TaskMap::new(),
        };
        store.load();
        store
    }

    /// Re-reads the task document, replacing in-memory state.
    ///
    /// A missing or corrupt document yields an empty map. Every record is
    /// migrated to the current shape.
    pub fn load(&mut self) -> &TaskMap {
        let today = self.clock.today();
        self.tasks = read_json_document(&self.repo, DocumentKind::Tasks)
            .map(|document| migrate_document(document, today))
            .unwrap_or_default();
        info!(
            "event=tasks_load module=task_store status=ok count={}",
            self.tasks.len()
        );
        &self.tasks
    }

    /// Writes the current task map to the repository.
    pub fn save(&self) -> StoreResult<()> {
        self.persist("tasks_save")
    }

    pub fn tasks(&self) -> &TaskMap {
        &self.tasks
    }

    pub fn get(&self, title: &str) -> Option<&Task> {
        self.tasks.get(title)
    }

    /// Creates or overwrites a task.
    ///
    /// `daily_minutes` is computed from cadence, total and deadline; progress
    /// and completion start from zero.
    ///
    /// # Errors
    /// - `Validation` for an empty title, non-positive minutes or an
    ///   unparseable deadline.
    pub fn add(
        &mut self,
        title: &str,
        total_minutes: i64,
        deadline: &str,
        cadence: Cadence,
    ) -> StoreResult<Task> {
        let title = normalize_title(title)?;
        let total_minutes = validate_total_minutes(total_minutes)?;
        let deadline = parse_date(deadline)?;
        let today = self.clock.today();

        let task = Task {
            total_minutes,
            daily_minutes: distribute(cadence, total_minutes, deadline, today),
            completed_minutes: 0,
            deadline,
            cadence,
            completed: false,
            created: today,
        };
        let replaced = self.tasks.insert(title, task.clone()).is_some();
        info!(
            "event=task_add module=task_store status=ok cadence={} replaced={}",
            cadence, replaced
        );
        self.persist("task_add")?;
        Ok(task)
    }

    /// Adds `delta_minutes` to the logged progress.
    ///
    /// Any integer is accepted; the total may go past `total_minutes`.
    pub fn log_progress(&mut self, title: &str, delta_minutes: i64) -> StoreResult<Task> {
        let task = self.task_mut(title)?;
        task.completed_minutes = task.completed_minutes.saturating_add(delta_minutes);
        let task = task.clone();
        self.persist("task_log_progress")?;
        Ok(task)
    }

    /// Flips the manual completion flag.
    pub fn toggle_complete(&mut self, title: &str) -> StoreResult<Task> {
        let task = self.task_mut(title)?;
        task.completed = !task.completed;
        let task = task.clone();
        self.persist("task_toggle_complete")?;
        Ok(task)
    }

    /// Moves a task to a new title, keeping every other field and its
    /// position.
    ///
    /// Renaming to the current title is a successful no-op.
    ///
    /// # Errors
    /// - `Validation` when `new_title` is empty or names another task.
    /// - `NotFound` when `old_title` does not exist.
    pub fn rename(&mut self, old_title: &str, new_title: &str) -> StoreResult<()> {
        let new_title = normalize_title(new_title)?;
        if !self.tasks.contains(old_title) {
            return Err(StoreError::NotFound(old_title.to_string()));
        }
        if new_title == old_title {
            return Ok(());
        }
        if self.tasks.contains(&new_title) {
            return Err(ValidationError::DuplicateTitle(new_title).into());
        }

        self.tasks.rename(old_title, new_title);
        self.persist("task_rename")
    }

    pub fn delete(&mut self, title: &str) -> StoreResult<Task> {
        let task = self
            .tasks
            .remove(title)
            .ok_or_else(|| StoreError::NotFound(title.to_string()))?;
        self.persist("task_delete")?;
        Ok(task)
    }

    /// Case-insensitive title substring search in insertion order.
    ///
    /// A blank keyword returns every task.
    pub fn search(&self, keyword: &str) -> Vec<(&str, &Task)> {
        let needle = keyword.trim().to_lowercase();
        self.tasks
            .iter()
            .filter(|(title, _)| needle.is_empty() || title.to_lowercase().contains(&needle))
            .collect()
    }

    fn task_mut(&mut self, title: &str) -> StoreResult<&mut Task> {
        self.tasks
            .get_mut(title)
            .ok_or_else(|| StoreError::NotFound(title.to_string()))
    }

    fn persist(&self, event: &'static str) -> StoreResult<()> {
        let started_at = Instant::now();
        match write_json_document(&self.repo, DocumentKind::Tasks, &self.tasks) {
            Ok(()) => {
                info!(
                    "event={} module=task_store status=persisted count={} duration_ms={}",
                    event,
                    self.tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={} module=task_store status=error error_code=persist_failed error={}",
                    event, err
                );
                Err(err.into())
            }
        }
    }
}
