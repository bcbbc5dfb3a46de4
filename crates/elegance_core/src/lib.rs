//! Core domain logic for the Elegance task list.
//! This crate owns the task collection, its derived views and persistence.

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use bootstrap::{open_store, BootstrapError, SqliteTaskStore};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Category, Priority, Task, TaskId, TaskValidationError};
pub use repo::kv_store::{KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};
pub use repo::task_repo::{
    decode_tasks, encode_tasks, KvTaskRepository, ReadError, TaskRepository, WriteError,
    DEFAULT_STORAGE_KEY,
};
pub use service::task_store::{default_seed_tasks, load_initial_tasks, InitSource, TaskStore};
pub use view::{CategoryCounts, CategoryFilter, TaskBoardSnapshot, TaskCounts};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
