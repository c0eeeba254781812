//! Hourly day-plan model.
//!
//! # Responsibility
//! - Define slot records stored in the schedule document.
//! - Map hours to `HH:00` slot keys and back.
//! - Count slot durations against the 1440-minute day budget.
//!
//! # Invariants
//! - Stored slots always carry a non-empty task and a positive duration.
//! - The budget is informational; allocations above it are allowed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Minutes in a full day.
pub const DAY_BUDGET_MINUTES: i64 = 1440;
/// Number of hourly slots in a day plan.
pub const HOURS_PER_DAY: u32 = 24;

static SLOT_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):00$").expect("valid slot key regex"));

/// Slot duration as found in the document: older files store the text the
/// user typed, newer writes store an integer.
///
/// Any other JSON value is kept as-is in `Other` so a hand-edited document
/// round-trips unchanged; it never counts towards the allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotDuration {
    Minutes(i64),
    Text(String),
    Other(Value),
}

impl SlotDuration {
    /// Integer minutes, or `None` when the stored value is not an integer.
    pub fn minutes(&self) -> Option<i64> {
        match self {
            Self::Minutes(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

impl Default for SlotDuration {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// One hourly entry of a day plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub duration: SlotDuration,
}

impl Slot {
    /// Minutes this slot contributes to the day's allocation.
    ///
    /// Slots without a task or with an unparseable duration contribute
    /// nothing.
    pub fn allocated_minutes(&self) -> Option<i64> {
        if self.task.trim().is_empty() {
            return None;
        }
        self.duration.minutes()
    }
}

/// Slots of one day keyed by `HH:00`.
pub type DaySchedule = BTreeMap<String, Slot>;
/// Day plans keyed by `YYYY-MM-DD`.
pub type Schedule = BTreeMap<String, DaySchedule>;

/// Returns the `HH:00` key for `hour`, or `None` outside `0..=23`.
pub fn slot_key(hour: u32) -> Option<String> {
    (hour < HOURS_PER_DAY).then(|| format!("{hour:02}:00"))
}

/// Parses an `HH:00` key back into its hour.
pub fn parse_slot_key(key: &str) -> Option<u32> {
    let captures = SLOT_KEY_RE.captures(key)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Sums the allocated minutes of a day's slots, saturating at the `i64`
/// bounds.
pub fn allocated_minutes(day: &DaySchedule) -> i64 {
    day.values()
        .filter_map(Slot::allocated_minutes)
        .fold(0_i64, i64::saturating_add)
}

/// Allocated/remaining view of a day against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAllocation {
    pub allocated: i64,
    /// `DAY_BUDGET_MINUTES - allocated`; negative when over-booked.
    pub remaining: i64,
}

impl DayAllocation {
    pub fn from_allocated(allocated: i64) -> Self {
        Self {
            allocated,
            remaining: DAY_BUDGET_MINUTES.saturating_sub(allocated),
        }
    }

    pub fn is_over_booked(&self) -> bool {
        self.remaining < 0
    }
}
