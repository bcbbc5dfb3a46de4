//! Task store use-case service.
//!
//! # Responsibility
//! - Own the authoritative in-memory task collection and the active filter.
//! - Apply user commands and persist the full collection after each one.
//! - Serve derived views computed on read.
//!
//! # Invariants
//! - Task ids are unique within the collection.
//! - Every mutating command saves synchronously before returning; a failed save
//!   is logged and leaves in-memory state authoritative.
//! - The filter is session state and is never persisted.
//! - Task text is never logged.

use crate::model::task::{now_iso8601, Category, Priority, Task, TaskId, TaskValidationError};
use crate::repo::task_repo::{ReadError, TaskRepository};
use crate::view::{self, CategoryCounts, CategoryFilter, TaskBoardSnapshot, TaskCounts};
use log::{debug, info, warn};

/// Where the initial collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSource {
    /// Decoded from the persisted key.
    Persisted,
    /// Key never written; default seed used.
    FirstRun,
    /// Persisted content unreadable or malformed; default seed used.
    Recovered,
}

/// Loads the persisted collection, falling back to the default seed.
///
/// Persisted tasks are returned verbatim. Read failures never propagate.
pub fn load_initial_tasks<R: TaskRepository>(repo: &R) -> (Vec<Task>, InitSource) {
    match repo.load_tasks() {
        Ok(Some(tasks)) => {
            info!(
                "event=store_init module=store status=ok source=persisted task_count={}",
                tasks.len()
            );
            (tasks, InitSource::Persisted)
        }
        Ok(None) => {
            info!("event=store_init module=store status=ok source=first_run");
            (default_seed_tasks(), InitSource::FirstRun)
        }
        Err(err) => {
            let error_code = match err {
                ReadError::Decode(_) => "decode_failed",
                ReadError::Store(_) => "read_failed",
            };
            warn!(
                "event=store_init module=store status=recovered source=seed error_code={} error={}",
                error_code, err
            );
            (default_seed_tasks(), InitSource::Recovered)
        }
    }
}

/// Example content shown on first run.
pub fn default_seed_tasks() -> Vec<Task> {
    let created_at = now_iso8601();
    let seed: [(&str, &str, bool, Priority, Category); 4] = [
        ("1", "Plan the project structure", true, Priority::High, Category::Work),
        ("2", "Build the interface components", false, Priority::High, Category::Work),
        ("3", "Clean the kitchen", false, Priority::Medium, Category::Home),
        ("4", "Take out the trash", false, Priority::Medium, Category::Home),
    ];

    seed.into_iter()
        .filter_map(|(id, text, completed, priority, category)| {
            Task::with_id(TaskId::from(id), text, priority, category, created_at.clone())
                .ok()
                .map(|task| task.with_completed(completed))
        })
        .collect()
}

/// Single-owner task list state machine.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    filter: CategoryFilter,
    init_source: InitSource,
    persisted: bool,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Builds a store from persisted state, or the default seed.
    pub fn initialize(repo: R) -> Self {
        let (tasks, init_source) = load_initial_tasks(&repo);
        Self {
            repo,
            tasks,
            filter: CategoryFilter::All,
            init_source,
            persisted: init_source == InitSource::Persisted,
        }
    }

    /// Adds a pending task at the front of the collection.
    ///
    /// Returns `None` without touching state or storage when `text` is blank.
    pub fn add(&mut self, text: &str, priority: Priority, category: Category) -> Option<Task> {
        match self.insert_new(text, priority, category) {
            Ok(task) => Some(task),
            Err(err) => {
                debug!("event=task_add module=store status=rejected reason={err}");
                None
            }
        }
    }

    /// Adds a task from loosely-typed input, rejecting unknown enum values.
    ///
    /// # Errors
    /// - `UnknownPriority`/`UnknownCategory` for out-of-set values.
    /// - `EmptyText` for blank text.
    ///
    /// State and storage are untouched on error.
    pub fn try_add(
        &mut self,
        text: &str,
        priority: &str,
        category: &str,
    ) -> Result<Task, TaskValidationError> {
        let priority = priority.parse::<Priority>()?;
        let category = category.parse::<Category>()?;
        self.insert_new(text, priority, category)
    }

    /// Flips `completed` on the matching task. Returns whether a task matched.
    pub fn toggle(&mut self, id: &TaskId) -> bool {
        let position = self.position(id);
        if let Some(index) = position {
            self.tasks[index] = self.tasks[index].toggled();
        }
        info!(
            "event=task_toggle module=store status={} task_id={}",
            match_status(position.is_some()),
            id
        );
        self.persist();
        position.is_some()
    }

    /// Removes the matching task. Returns whether a task matched.
    pub fn delete(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        let removed = self.tasks.len() != before;
        info!(
            "event=task_delete module=store status={} task_id={}",
            match_status(removed),
            id
        );
        self.persist();
        removed
    }

    /// Removes every completed task and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.is_completed());
        let removed = before - self.tasks.len();
        info!("event=tasks_clear_completed module=store status=ok removed={removed}");
        self.persist();
        removed
    }

    /// Updates the session filter; storage is not touched.
    pub fn set_filter(&mut self, filter: impl Into<CategoryFilter>) {
        self.filter = filter.into();
        debug!(
            "event=filter_set module=store status=ok filter={}",
            self.filter
        );
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// Full collection in storage order (newest first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn visible_tasks(&self) -> Vec<Task> {
        view::visible_tasks(&self.tasks, self.filter)
    }

    pub fn counts(&self) -> TaskCounts {
        view::task_counts(&self.tasks)
    }

    pub fn category_counts(&self) -> CategoryCounts {
        view::category_counts(&self.tasks)
    }

    pub fn completion_rate(&self) -> u32 {
        view::completion_rate(self.counts())
    }

    /// Read model for the presentation layer.
    pub fn snapshot(&self) -> TaskBoardSnapshot {
        view::snapshot(&self.tasks, self.filter)
    }

    pub fn init_source(&self) -> InitSource {
        self.init_source
    }

    /// Whether the last save succeeded. `false` after a fresh seed until the
    /// first save.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    fn insert_new(
        &mut self,
        text: &str,
        priority: Priority,
        category: Category,
    ) -> Result<Task, TaskValidationError> {
        let mut task = Task::new(text, priority, category)?;
        while self.position(task.id()).is_some() {
            task = Task::new(text, priority, category)?;
        }

        self.tasks.insert(0, task.clone());
        info!(
            "event=task_add module=store status=ok task_id={} priority={} category={}",
            task.id(),
            priority,
            category
        );
        self.persist();
        Ok(task)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn persist(&mut self) {
        match self.repo.save_tasks(&self.tasks) {
            Ok(()) => {
                self.persisted = true;
                debug!(
                    "event=tasks_save module=store status=ok task_count={}",
                    self.tasks.len()
                );
            }
            Err(err) => {
                self.persisted = false;
                warn!(
                    "event=tasks_save module=store status=error error_code=write_failed task_count={} error={}",
                    self.tasks.len(),
                    err
                );
            }
        }
    }
}

fn match_status(matched: bool) -> &'static str {
    if matched {
        "ok"
    } else {
        "not_found"
    }
}

#[cfg(test)]
mod tests {
    use super::default_seed_tasks;
    use std::collections::HashSet;

    #[test]
    fn seed_has_four_tasks_with_one_completed() {
        let seed = default_seed_tasks();
        assert_eq!(seed.len(), 4);
        assert_eq!(seed.iter().filter(|task| task.is_completed()).count(), 1);

        let ids = seed.iter().map(|task| task.id().clone()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 4);
    }
}
