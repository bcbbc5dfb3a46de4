//! Task collection persistence contract and key-value implementation.
//!
//! # Responsibility
//! - Encode/decode the full task collection under one fixed key.
//! - Report failures as values; the caller decides whether to continue.
//!
//! # Invariants
//! - The whole collection is written on every save; there are no partial writes.
//! - A never-written key, or one holding only whitespace, loads as `Ok(None)`;
//!   malformed content loads as `Err(ReadError::Decode)` so the two cases stay
//!   distinguishable.
//! - No schema migration is performed on load.

use crate::model::task::Task;
use crate::repo::kv_store::{KeyValueStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key the web client has always used for the task collection.
pub const DEFAULT_STORAGE_KEY: &str = "elegance-todos";

/// Failure while saving the task collection.
#[derive(Debug)]
pub enum WriteError {
    Encode(serde_json::Error),
    Store(StoreError),
}

impl Display for WriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::Store(err) => write!(f, "failed to write tasks: {err}"),
        }
    }
}

impl Error for WriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for WriteError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Failure while loading the task collection.
#[derive(Debug)]
pub enum ReadError {
    Store(StoreError),
    /// Persisted content exists but is not a valid task collection.
    Decode(serde_json::Error),
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "failed to read tasks: {err}"),
            Self::Decode(err) => write!(f, "malformed persisted tasks: {err}"),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<StoreError> for ReadError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Persistence adapter used by the task store.
pub trait TaskRepository {
    fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), WriteError>;
    fn load_tasks(&self) -> Result<Option<Vec<Task>>, ReadError>;
}

/// JSON-over-key-value task repository.
#[derive(Debug, Clone)]
pub struct KvTaskRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    /// Uses `DEFAULT_STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> TaskRepository for KvTaskRepository<S> {
    fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), WriteError> {
        let encoded = encode_tasks(tasks)?;
        self.store.set_item(&self.key, &encoded)?;
        Ok(())
    }

    fn load_tasks(&self) -> Result<Option<Vec<Task>>, ReadError> {
        match self.store.get_item(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => decode_tasks(&raw).map(Some),
            _ => Ok(None),
        }
    }
}

/// Serializes a task collection to its persisted JSON form.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, WriteError> {
    serde_json::to_string(tasks).map_err(WriteError::Encode)
}

/// Parses the persisted JSON form; unknown enum values fail the whole decode.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, ReadError> {
    serde_json::from_str(raw).map_err(ReadError::Decode)
}
