//! Task budget model.
//!
//! # Responsibility
//! - Define the canonical task record stored in the task document.
//! - Keep the title-keyed task map in insertion order.
//! - Derive display-only views (remaining minutes, days left, progress).
//!
//! # Invariants
//! - Titles are unique map keys; renaming never leaves both keys present.
//! - `daily_minutes` is cached; it is only recomputed at creation and migration.
//! - `completed_minutes` may exceed `total_minutes`; only display values clamp.

use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How a task's total effort is spread over the time left before its deadline.
///
/// Declaration order is the display order of summary categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cadence {
    /// The full amount is due every day until complete.
    Daily,
    /// Spread evenly over the remaining weeks.
    Weekly,
    /// Spread evenly over the remaining months.
    Monthly,
}

impl Cadence {
    /// Every cadence, in display order.
    pub const ALL: [Cadence; 3] = [Cadence::Daily, Cadence::Weekly, Cadence::Monthly];

    /// Returns the wire label (`Daily|Weekly|Monthly`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    /// Parses a label case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl Display for Cadence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ValidationError::UnknownCadence(value.to_string()))
    }
}

/// Canonical (current-shape) task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Total effort required, in minutes.
    pub total_minutes: i64,
    /// Cached per-period target computed by the time distributor.
    pub daily_minutes: i64,
    /// Cumulative effort logged so far.
    pub completed_minutes: i64,
    pub deadline: NaiveDate,
    /// Serialized as `type` to match the document schema.
    #[serde(rename = "type")]
    pub cadence: Cadence,
    /// Manual completion flag, independent of logged minutes.
    pub completed: bool,
    /// Set once at creation.
    pub created: NaiveDate,
}

impl Task {
    /// Minutes still to log, never negative.
    pub fn remaining_minutes(&self) -> i64 {
        (self.total_minutes - self.completed_minutes).max(0)
    }

    /// Calendar days until the deadline, inclusive of today and the deadline
    /// day, floored at 1 once the deadline has passed.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        ((self.deadline - today).num_days() + 1).max(1)
    }

    pub fn is_over_completed(&self) -> bool {
        self.completed_minutes > self.total_minutes
    }

    /// Completion percentage in `0.0..=100.0`; `0.0` when there is no total.
    pub fn progress_percent(&self) -> f64 {
        if self.total_minutes <= 0 {
            return 0.0;
        }
        let ratio = self.completed_minutes as f64 / self.total_minutes as f64 * 100.0;
        ratio.clamp(0.0, 100.0)
    }
}

/// Title-keyed task map preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskMap {
    entries: Vec<(String, Task)>,
}

impl TaskMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn get(&self, title: &str) -> Option<&Task> {
        self.position(title).map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Task> {
        match self.position(title) {
            Some(index) => Some(&mut self.entries[index].1),
            None => None,
        }
    }

    /// Inserts or overwrites a task.
    ///
    /// Overwriting keeps the title's original position and returns the
    /// previous record.
    pub fn insert(&mut self, title: impl Into<String>, task: Task) -> Option<Task> {
        let title = title.into();
        match self.position(&title) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, task)),
            None => {
                self.entries.push((title, task));
                None
            }
        }
    }

    /// Removes a task, keeping the order of the remaining entries.
    pub fn remove(&mut self, title: &str) -> Option<Task> {
        self.position(title)
            .map(|index| self.entries.remove(index).1)
    }

    /// Re-keys `old` as `new` in place.
    ///
    /// Returns `false` without changes when `old` is absent or `new` is
    /// already taken by a different entry.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> bool {
        let new = new.into();
        if old != new && self.contains(&new) {
            return false;
        }
        match self.position(old) {
            Some(index) => {
                self.entries[index].0 = new;
                true
            }
            None => false,
        }
    }

    /// Iterates `(title, task)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Task)> {
        self.entries
            .iter()
            .map(|(title, task)| (title.as_str(), task))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(title, _)| title.as_str())
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing == title)
    }
}

impl FromIterator<(String, Task)> for TaskMap {
    fn from_iter<I: IntoIterator<Item = (String, Task)>>(iter: I) -> Self {
        let mut map = TaskMap::new();
        for (title, task) in iter {
            map.insert(title, task);
        }
        map
    }
}

impl Serialize for TaskMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(title, task)| (title, task)))
    }
}
