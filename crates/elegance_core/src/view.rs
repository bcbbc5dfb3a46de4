//! Derived task list views.
//!
//! # Responsibility
//! - Compute filtered/sorted display order and aggregate statistics.
//!
//! # Invariants
//! - Every function is a pure function of its input slice; nothing is cached.
//! - Aggregates are always computed over the full, unfiltered collection.
//! - Display sort is stable: equal `(completed, priority)` keys keep their
//!   collection order.

use crate::model::task::{Category, Task, TaskValidationError};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Ephemeral category selection controlling which tasks are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Returns whether `task` passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => task.category() == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse::<Category>().map(Self::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        Self::Only(value)
    }
}

/// Global completion counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Per-category task counts, `All` first, then categories in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts {
    entries: Vec<(CategoryFilter, usize)>,
}

impl CategoryCounts {
    /// Count for one filter entry.
    pub fn get(&self, filter: CategoryFilter) -> usize {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == filter)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryFilter, usize)> + '_ {
        self.entries.iter().copied()
    }
}

/// Presentation-facing read model returned after each command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoardSnapshot {
    pub filter: CategoryFilter,
    pub visible: Vec<Task>,
    pub counts: TaskCounts,
    pub category_counts: CategoryCounts,
    pub completion_rate: u32,
}

/// Filters by `filter`, then sorts pending before completed and, within each
/// group, by priority rank `high < medium < low`.
pub fn visible_tasks(tasks: &[Task], filter: CategoryFilter) -> Vec<Task> {
    let mut visible = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect::<Vec<_>>();
    // `sort_by_key` is stable.
    visible.sort_by_key(|task| (task.is_completed(), task.priority().rank()));
    visible
}

pub fn task_counts(tasks: &[Task]) -> TaskCounts {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    TaskCounts {
        total,
        completed,
        pending: total - completed,
    }
}

pub fn category_counts(tasks: &[Task]) -> CategoryCounts {
    let mut entries = Vec::with_capacity(Category::ALL.len() + 1);
    entries.push((CategoryFilter::All, tasks.len()));
    for category in Category::ALL {
        let count = tasks
            .iter()
            .filter(|task| task.category() == category)
            .count();
        entries.push((CategoryFilter::Only(category), count));
    }
    CategoryCounts { entries }
}

/// Integer completion percentage, rounded half-up.
///
/// Returns `0` for an empty collection.
pub fn completion_rate(counts: TaskCounts) -> u32 {
    if counts.total == 0 {
        return 0;
    }
    let rate = (counts.completed * 100 + counts.total / 2) / counts.total;
    u32::try_from(rate).unwrap_or(100)
}

/// Builds the full read model for one filter.
pub fn snapshot(tasks: &[Task], filter: CategoryFilter) -> TaskBoardSnapshot {
    let counts = task_counts(tasks);
    TaskBoardSnapshot {
        filter,
        visible: visible_tasks(tasks, filter),
        counts,
        category_counts: category_counts(tasks),
        completion_rate: completion_rate(counts),
    }
}
