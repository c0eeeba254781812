//! Schedule store: per-date hourly plans with day-budget accounting.
//!
//! # Responsibility
//! - Load and hold the date-keyed schedule document.
//! - Upsert or clear single hourly slots, persisting the whole schedule.
//! - Report allocated and remaining minutes against the 1440-minute day.
//!
//! # Invariants
//! - Stored slots always have a non-empty task and a positive duration.
//! - A day is created on its first stored slot and never removed.
//! - `total_allocated(date) + remaining_budget(date) == 1440`.

use crate::model::date::{format_iso_date, parse_iso_date};
use crate::model::schedule::{
    allocated_minutes, parse_slot_key, slot_key, DayAllocation, DaySchedule, Schedule, Slot,
    SlotDuration, DAY_BUDGET_MINUTES,
};
use crate::model::validation::{parse_date, ValidationError};
use crate::repo::document_repo::{
    read_json_document, write_json_document, DocumentKind, DocumentRepository,
};
use crate::service::error::StoreResult;
use log::{error, info, warn};
use serde_json::{Map, Value};
use std::time::Instant;

/// Owned schedule map bound to a document repository.
pub struct ScheduleStore<R: DocumentRepository> {
    repo: R,
    schedule: Schedule,
}

impl<R: DocumentRepository> ScheduleStore<R> {
    /// Opens the store, loading the schedule document.
    pub fn open(repo: R) -> Self {
        let mut store = Self {
            repo,
            schedule: Schedule::new(),
        };
        store.load();
        store
    }

    /// Re-reads the schedule document, replacing in-memory state.
    ///
    /// A missing or corrupt document yields an empty schedule. Days that are
    /// not objects, slots that fail to decode, and slots stored under keys
    /// other than `HH:00` are dropped and logged; the rest of the day loads.
    pub fn load(&mut self) -> &Schedule {
        self.schedule = read_json_document(&self.repo, DocumentKind::Schedule)
            .map(decode_schedule)
            .unwrap_or_default();
        info!(
            "event=schedule_load module=schedule_store status=ok days={}",
            self.schedule.len()
        );
        &self.schedule
    }

    /// Replaces the whole schedule and persists it.
    pub fn save(&mut self, schedule: Schedule) -> StoreResult<()> {
        self.schedule = schedule;
        self.persist("schedule_save")
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Scheduled dates in chronological order.
    pub fn dates(&self) -> Vec<&str> {
        self.schedule.keys().map(String::as_str).collect()
    }

    /// Returns the day's slots, or an empty map for an unscheduled date.
    pub fn get_day(&self, date: &str) -> DaySchedule {
        self.schedule
            .get(&date_key(date))
            .cloned()
            .unwrap_or_default()
    }

    /// Upserts or clears the slot at `hour` on `date`.
    ///
    /// Blank task text, a blank duration, or a duration of zero or less clear
    /// the slot. Returns the stored slot, or `None` when it was cleared.
    ///
    /// # Errors
    /// - `Validation` for an invalid date, an hour outside `0..=23`, or a
    ///   non-blank duration that is not an integer.
    pub fn set_slot(
        &mut self,
        date: &str,
        hour: u32,
        task_text: &str,
        duration_text: &str,
    ) -> StoreResult<Option<Slot>> {
        let day_key = format_iso_date(parse_date(date)?);
        let key = slot_key(hour).ok_or(ValidationError::InvalidHour(hour))?;
        let task_text = task_text.trim();
        let duration_text = duration_text.trim();

        let duration = if duration_text.is_empty() {
            None
        } else {
            let minutes = duration_text
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidDuration(duration_text.to_string()))?;
            Some(minutes)
        };

        let stored = match duration {
            Some(minutes) if minutes > 0 && !task_text.is_empty() => {
                let slot = Slot {
                    task: task_text.to_string(),
                    duration: SlotDuration::Minutes(minutes),
                };
                self.schedule
                    .entry(day_key.clone())
                    .or_default()
                    .insert(key, slot.clone());
                Some(slot)
            }
            _ => {
                if let Some(day) = self.schedule.get_mut(&day_key) {
                    day.remove(&key);
                }
                None
            }
        };

        info!(
            "event=slot_set module=schedule_store status=ok date={} hour={} cleared={}",
            day_key,
            hour,
            stored.is_none()
        );
        self.persist("slot_set")?;
        Ok(stored)
    }

    /// Sums slot durations for the date, skipping unparseable entries and
    /// saturating instead of overflowing.
    pub fn total_allocated(&self, date: &str) -> i64 {
        self.schedule
            .get(&date_key(date))
            .map(allocated_minutes)
            .unwrap_or(0)
    }

    /// `1440 - total_allocated(date)`; negative when over-booked.
    pub fn remaining_budget(&self, date: &str) -> i64 {
        DAY_BUDGET_MINUTES.saturating_sub(self.total_allocated(date))
    }

    pub fn allocation(&self, date: &str) -> DayAllocation {
        DayAllocation::from_allocated(self.total_allocated(date))
    }

    fn persist(&self, event: &'static str) -> StoreResult<()> {
        let started_at = Instant::now();
        match write_json_document(&self.repo, DocumentKind::Schedule, &self.schedule) {
            Ok(()) => {
                info!(
                    "event={} module=schedule_store status=persisted days={} duration_ms={}",
                    event,
                    self.schedule.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={} module=schedule_store status=error error_code=persist_failed error={}",
                    event, err
                );
                Err(err.into())
            }
        }
    }
}

fn decode_schedule(document: Map<String, Value>) -> Schedule {
    let mut schedule = Schedule::new();
    for (date, value) in document {
        let Value::Object(slots) = value else {
            warn!(
                "event=schedule_load module=schedule_store status=skipped date={} reason=not_an_object",
                date
            );
            continue;
        };
        let day = schedule.entry(date).or_default();
        for (key, slot) in slots {
            if parse_slot_key(&key).is_none() {
                warn!("event=schedule_load module=schedule_store status=skipped reason=invalid_slot_key");
                continue;
            }
            match serde_json::from_value::<Slot>(slot) {
                Ok(slot) => {
                    day.insert(key, slot);
                }
                Err(err) => {
                    warn!(
                        "event=schedule_load module=schedule_store status=skipped slot={} reason=undecodable error={}",
                        key, err
                    );
                }
            }
        }
    }
    schedule
}

/// Canonical document key for a caller-supplied date; unparseable input is
/// looked up as given (trimmed) and simply matches nothing.
fn date_key(date: &str) -> String {
    parse_iso_date(date)
        .map(format_iso_date)
        .unwrap_or_else(|| date.trim().to_string())
}
