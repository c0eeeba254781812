//! Plain-text rendering of store state.

use beprecise_core::{
    slot_key, DayAllocation, DaySchedule, ProgressSummary, Task, DAY_BUDGET_MINUTES,
    HOURS_PER_DAY,
};
use chrono::NaiveDate;
use std::fmt::Write;

pub fn task_line(title: &str, task: &Task, today: NaiveDate) -> String {
    let mut line = format!(
        "{title} ({cadence}) - Total: {total} min | Daily Target: {daily} min | Completed: {done} min | Days Left: {days}",
        cadence = task.cadence,
        total = task.total_minutes,
        daily = task.daily_minutes,
        done = task.completed_minutes,
        days = task.days_left(today),
    );
    if task.completed {
        line.push_str(" [done]");
    }
    line
}

pub fn task_list(tasks: &[(&str, &Task)], today: NaiveDate) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }
    let mut out = String::new();
    for (title, task) in tasks {
        let _ = writeln!(out, "{}", task_line(title, task, today));
    }
    out
}

/// Renders all 24 slots followed by the day's budget line.
pub fn day_plan(date: &str, day: &DaySchedule, allocation: DayAllocation) -> String {
    let mut out = format!("Plan for {date}\n");
    for hour in 0..HOURS_PER_DAY {
        let Some(key) = slot_key(hour) else {
            continue;
        };
        match day.get(&key) {
            Some(slot) => {
                let duration = slot
                    .allocated_minutes()
                    .map(|minutes| format!("{minutes} min"))
                    .unwrap_or_else(|| "? min".to_string());
                let _ = writeln!(out, "{key}  {}  ({duration})", slot.task);
            }
            None => {
                let _ = writeln!(out, "{key}  -");
            }
        }
    }
    let _ = write!(
        out,
        "Total Available Time: {DAY_BUDGET_MINUTES} minutes | Allocated: {} minutes | Remaining: {} minutes",
        allocation.allocated, allocation.remaining
    );
    if allocation.is_over_booked() {
        out.push_str(" (over-booked)");
    }
    out.push('\n');
    out
}

/// Renders progress grouped by cadence; empty groups only with `include_empty`.
pub fn summary(summary: &ProgressSummary, include_empty: bool) -> String {
    if summary.values().all(Vec::is_empty) {
        return "No tasks to display.\n".to_string();
    }
    let mut out = String::new();
    for (cadence, rows) in summary {
        if rows.is_empty() && !include_empty {
            continue;
        }
        let _ = writeln!(out, "{cadence} Tasks");
        if rows.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for row in rows {
            let _ = write!(
                out,
                "  {}: {}/{} min ({:.1}%)",
                row.title, row.completed_minutes, row.total_minutes, row.progress_percent
            );
            if row.over_completed {
                out.push_str(" over target");
            }
            out.push('\n');
        }
    }
    out
}
