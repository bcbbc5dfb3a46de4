//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted entity of the task list.
//! - Keep priority/category as closed enums so unknown values are rejected at
//!   the decode boundary instead of flowing into business logic.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes.
//! - `text` is non-empty after trimming and is never mutated.
//! - Only `completed` changes over a task lifetime, through `toggled()`.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque task identifier.
///
/// Freshly created tasks get a UUID v4 string. Identifiers decoded from
/// persisted data are kept verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a collision-resistant identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ordinal urgency tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    /// Preselected by the add form.
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: `high=0`, `medium=1`, `low=2`.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Stable persisted spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(TaskValidationError::UnknownPriority(value.to_string())),
        }
    }
}

/// Closed set of task categories.
///
/// Persisted spellings match what the web client has always written under the
/// storage key; English spellings are accepted as aliases on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "työ", alias = "work")]
    Work,
    #[serde(rename = "koti", alias = "home")]
    Home,
    #[serde(rename = "harrastukset", alias = "hobbies")]
    Hobbies,
    #[serde(rename = "muu", alias = "other")]
    Other,
}

impl Category {
    /// All categories in declared (display) order.
    pub const ALL: [Category; 4] = [Self::Work, Self::Home, Self::Hobbies, Self::Other];

    /// Stable persisted spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "työ",
            Self::Home => "koti",
            Self::Hobbies => "harrastukset",
            Self::Other => "muu",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "työ" | "work" => Ok(Self::Work),
            "koti" | "home" => Ok(Self::Home),
            "harrastukset" | "hobbies" => Ok(Self::Hobbies),
            "muu" | "other" => Ok(Self::Other),
            _ => Err(TaskValidationError::UnknownCategory(value.to_string())),
        }
    }
}

/// Rejected task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty or whitespace-only.
    EmptyText,
    /// Caller-supplied id is empty.
    EmptyId,
    UnknownPriority(String),
    UnknownCategory(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be empty"),
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::UnknownPriority(value) => {
                write!(f, "unknown priority `{value}`; expected high|medium|low")
            }
            Self::UnknownCategory(value) => write!(
                f,
                "unknown category `{value}`; expected työ|koti|harrastukset|muu"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do entry.
///
/// Serialized with camelCase field names; the shape is the persisted wire
/// format and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
    priority: Priority,
    category: Category,
    created_at: String,
}

impl Task {
    /// Creates a pending task with a fresh id and the current UTC timestamp.
    ///
    /// Leading/trailing whitespace of `text` is dropped.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank.
    pub fn new(
        text: &str,
        priority: Priority,
        category: Category,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(TaskId::generate(), text, priority, category, now_iso8601())
    }

    /// Creates a pending task with caller-provided identity and timestamp.
    ///
    /// Used for seed data and imports where identity already exists.
    pub fn with_id(
        id: TaskId,
        text: &str,
        priority: Priority,
        category: Category,
        created_at: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        if id.as_str().trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }

        Ok(Self {
            id,
            text: text.to_string(),
            completed: false,
            priority,
            category,
            created_at: created_at.into(),
        })
    }

    /// Returns this task with `completed` set.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Returns a copy with `completed` flipped.
    pub fn toggled(&self) -> Self {
        self.clone().with_completed(!self.completed)
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// ISO-8601 creation timestamp.
    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Current UTC time in the `YYYY-MM-DDTHH:MM:SS.mmmZ` shape.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
