//! Input validation for store write paths.
//!
//! # Responsibility
//! - Turn raw presentation-layer input into typed values.
//! - Report rejected input with a recoverable, user-facing error.
//!
//! # Invariants
//! - Validation never mutates store state; callers re-prompt on error.

use crate::model::date::parse_iso_date;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty after trimming.
    EmptyTitle,
    /// Rename target already names another task.
    DuplicateTitle(String),
    /// Total minutes must be a positive integer.
    NonPositiveMinutes(i64),
    /// Minutes text is not an integer.
    InvalidMinutes(String),
    /// Slot duration text is not an integer.
    InvalidDuration(String),
    /// Date text is not a valid `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Slot hour outside `0..=23`.
    InvalidHour(u32),
    /// Cadence label is not one of Daily/Weekly/Monthly.
    UnknownCadence(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::DuplicateTitle(title) => write!(f, "a task named `{title}` already exists"),
            Self::NonPositiveMinutes(value) => {
                write!(f, "minutes must be a positive number, got {value}")
            }
            Self::InvalidMinutes(value) => write!(f, "`{value}` is not a whole number of minutes"),
            Self::InvalidDuration(value) => {
                write!(f, "`{value}` is not a valid duration in minutes")
            }
            Self::InvalidDate(value) => write!(f, "`{value}` is not a valid YYYY-MM-DD date"),
            Self::InvalidHour(hour) => write!(f, "hour must be between 0 and 23, got {hour}"),
            Self::UnknownCadence(value) => {
                write!(f, "unknown task type `{value}`; expected Daily|Weekly|Monthly")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims a task title and rejects blank input.
pub fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Accepts only strictly positive totals.
pub fn validate_total_minutes(total_minutes: i64) -> Result<i64, ValidationError> {
    if total_minutes <= 0 {
        return Err(ValidationError::NonPositiveMinutes(total_minutes));
    }
    Ok(total_minutes)
}

/// Parses minutes text typed by the user (`"90"`, `" 15 "`).
pub fn parse_minutes(text: &str) -> Result<i64, ValidationError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidMinutes(text.to_string()))
}

/// Parses a deadline or schedule date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    parse_iso_date(text).ok_or_else(|| ValidationError::InvalidDate(text.to_string()))
}
