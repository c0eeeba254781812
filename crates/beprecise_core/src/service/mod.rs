//! Core use-case services.
//!
//! # Responsibility
//! - Own the task and schedule state behind command-style APIs.
//! - Keep presentation callers decoupled from storage and migration details.
//!
//! # Invariants
//! - Stores persist through `DocumentRepository` only.
//! - Date-dependent logic takes "today" from an injected `Clock`.

pub mod distributor;
pub mod error;
pub mod migration;
pub mod schedule_store;
pub mod summary;
pub mod task_store;
