//! Composition root for hosts embedding the task store.
//!
//! # Responsibility
//! - Turn a `CoreConfig` into a ready `TaskStore` backed by SQLite.
//!
//! # Invariants
//! - Config is validated before any side effect.
//! - Logging is only initialized when the config names a `log_dir`.

use crate::config::{ConfigError, CoreConfig};
use crate::db::{open_db, open_db_in_memory};
use crate::logging::{init_logging, LoggingError};
use crate::repo::kv_store::{SqliteKvStore, StoreError};
use crate::repo::task_repo::KvTaskRepository;
use crate::service::task_store::TaskStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Task store persisted through SQLite.
pub type SqliteTaskStore = TaskStore<KvTaskRepository<SqliteKvStore>>;

#[derive(Debug)]
pub enum BootstrapError {
    Config(ConfigError),
    Logging(LoggingError),
    Store(StoreError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for BootstrapError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<StoreError> for BootstrapError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Opens storage and initializes a task store from `config`.
///
/// Without `db_path` the store is in-memory and nothing survives the session;
/// use `CoreConfig::persistent` for durable tasks.
///
/// # Errors
/// - Invalid config, logging conflicts, or SQLite open/migration failure.
///   Unreadable task content is not an error; the store falls back to the seed.
pub fn open_store(config: &CoreConfig) -> Result<SqliteTaskStore, BootstrapError> {
    config.validate()?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    if config.is_ephemeral() {
        warn!("event=store_open module=bootstrap status=ephemeral reason=no_db_path");
    }

    let conn = match &config.db_path {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    }
    .map_err(StoreError::from)?;
    let kv_store = SqliteKvStore::try_new(conn)?;
    let repo = KvTaskRepository::with_key(kv_store, config.storage_key.clone());
    let store = TaskStore::initialize(repo);

    info!(
        "event=store_open module=bootstrap status=ok persistent={} task_count={}",
        config.db_path.is_some(),
        store.tasks().len()
    );
    Ok(store)
}
