//! Persistence abstractions and implementations.
//!
//! # Responsibility
//! - Define the task persistence contract used by the store.
//! - Provide key-value backends (in-memory, SQLite) behind one trait.
//!
//! # Invariants
//! - Repository APIs return failures as values and never panic.
//! - Only the task store talks to a repository.

pub mod kv_store;
pub mod task_repo;
