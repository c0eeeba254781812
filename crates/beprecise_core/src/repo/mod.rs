//! Durable storage for the task and schedule documents.
//!
//! # Responsibility
//! - Define the whole-document read/write contract used by the stores.
//! - Provide JSON-file and SQLite implementations.
//!
//! # Invariants
//! - Repositories move opaque document bodies; parsing and migration belong
//!   to the stores.

pub mod document_repo;
pub mod json_repo;
pub mod sqlite_repo;
