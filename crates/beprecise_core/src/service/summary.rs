//! Per-cadence progress summary.
//!
//! Pure derivation over a task map; nothing here is stored.

use crate::model::task::{Cadence, TaskMap};
use std::collections::BTreeMap;

/// One task's progress line.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub title: String,
    pub completed_minutes: i64,
    pub total_minutes: i64,
    /// `min(completed / total * 100, 100)`, or `0.0` without a total.
    pub progress_percent: f64,
    /// Logged minutes exceed the total.
    pub over_completed: bool,
}

/// Rows grouped by cadence, iterated Daily, Weekly, Monthly.
pub type ProgressSummary = BTreeMap<Cadence, Vec<SummaryRow>>;

/// Groups tasks by cadence, keeping task order inside each group.
///
/// All three cadences are present even when empty; callers decide whether
/// to render empty groups.
pub fn summarize(tasks: &TaskMap) -> ProgressSummary {
    let mut summary: ProgressSummary = Cadence::ALL
        .iter()
        .map(|cadence| (*cadence, Vec::new()))
        .collect();

    for (title, task) in tasks.iter() {
        summary.entry(task.cadence).or_default().push(SummaryRow {
            title: title.to_string(),
            completed_minutes: task.completed_minutes,
            total_minutes: task.total_minutes,
            progress_percent: task.progress_percent(),
            over_completed: task.is_over_completed(),
        });
    }
    summary
}
