//! Task list domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the task store.
//! - Own the persisted wire shape of a task.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Priority and category are closed enums; unknown strings never decode.

pub mod task;
