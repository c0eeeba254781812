//! Domain model for task budgets and hourly day plans.
//!
//! # Responsibility
//! - Define the records persisted in the task and schedule documents.
//! - Provide input validation shared by store write paths.
//!
//! # Invariants
//! - Tasks are identified by their unique, non-empty title.
//! - Calendar dates are naive `YYYY-MM-DD` values; no timezone handling.

pub mod date;
pub mod schedule;
pub mod task;
pub mod validation;
