//! Status updates and queries over a task store.
//!
//! These are the operations behind the `done`, `status`, `list`,
//! `progress`, `next` and `implement` commands, free of any output
//! formatting so they can be tested directly.

use crate::error::{Error, Result};
use crate::model::{Task, TaskStatus};
use crate::storage::TaskStore;
use crate::validate::find_similar_ids;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Build the not-found error for `id`, suggesting close ids from `tasks`.
pub(crate) fn task_not_found(id: &str, tasks: &[Task]) -> Error {
    let similar = find_similar_ids(id, tasks.iter().map(|t| t.id.as_str()), 3);
    if similar.is_empty() {
        Error::TaskNotFound { id: id.to_string() }
    } else {
        Error::TaskNotFoundSimilar {
            id: id.to_string(),
            similar,
        }
    }
}

fn find_index(tasks: &[Task], id: &str, source_path: Option<&str>) -> Option<usize> {
    tasks
        .iter()
        .position(|t| t.id == id && source_path.is_none_or(|p| t.source_path == p))
}

/// First task matching `id`, and `source_path` when given.
///
/// # Errors
///
/// Returns `TaskNotFound` if nothing matches.
pub fn find_task<'a>(tasks: &'a [Task], id: &str, source_path: Option<&str>) -> Result<&'a Task> {
    find_index(tasks, id, source_path)
        .map(|i| &tasks[i])
        .ok_or_else(|| task_not_found(id, tasks))
}

/// Set the status of the first task matching `id` (and `source_path`, if
/// given), stamp `updated_at`, and rewrite the store.
///
/// Returns the updated task.
///
/// # Errors
///
/// Returns `TaskNotFound` without touching the store file if nothing
/// matches, or an I/O error if the rewrite fails.
pub fn set_status(
    store: &mut TaskStore,
    id: &str,
    status: TaskStatus,
    source_path: Option<&str>,
) -> Result<Task> {
    let index = find_index(store.tasks(), id, source_path)
        .ok_or_else(|| task_not_found(id, store.tasks()))?;

    let task = &mut store.tasks_mut()[index];
    let previous = task.status;
    task.status = status;
    task.updated_at = Utc::now();
    let updated = task.clone();

    store.save()?;
    info!(id, from = %previous, to = %status, "updated task status");
    Ok(updated)
}

/// Set a task in progress and return it for display.
///
/// # Errors
///
/// Propagates the failure of [`set_status`]; nothing is shown then.
pub fn mark_in_progress_and_show(
    store: &mut TaskStore,
    id: &str,
    source_path: Option<&str>,
) -> Result<Task> {
    set_status(store, id, TaskStatus::InProgress, source_path)
}

/// Optional filters for [`list_tasks`].
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    /// Compared case-insensitively.
    pub category: Option<String>,
}

impl TaskFilter {
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|s| task.status == s)
            && self
                .category
                .as_deref()
                .is_none_or(|c| task.category.to_lowercase() == c.to_lowercase())
    }
}

/// Tasks matching `filter`, in store order.
#[must_use]
pub fn list_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Progress of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProgress {
    pub category: String,
    pub total: usize,
    pub done: usize,
    pub percent: f64,
}

/// Counts across the whole store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub blocked: usize,
    pub percent: f64,
    /// Sorted by category name.
    pub categories: Vec<CategoryProgress>,
}

#[allow(clippy::cast_precision_loss)]
fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}

/// Count tasks by status and by category.
///
/// An empty store yields zero counts and `0.0` percent.
#[must_use]
pub fn progress_summary(tasks: &[Task]) -> ProgressSummary {
    let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

    let mut by_category: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for task in tasks {
        let entry = by_category.entry(task.category.as_str()).or_default();
        entry.0 += 1;
        if task.is_done() {
            entry.1 += 1;
        }
    }

    let done = count(TaskStatus::Done);
    ProgressSummary {
        total: tasks.len(),
        done,
        in_progress: count(TaskStatus::InProgress),
        pending: count(TaskStatus::Pending),
        blocked: count(TaskStatus::Blocked),
        percent: percent(done, tasks.len()),
        categories: by_category
            .into_iter()
            .map(|(category, (total, done))| CategoryProgress {
                category: category.to_string(),
                total,
                done,
                percent: percent(done, total),
            })
            .collect(),
    }
}

/// Whether every dependency of `task` is done.
///
/// A dependency id resolves to the first record with that id anywhere in
/// the store. A dependency with no record counts as not done, so it blocks
/// the task indefinitely.
fn dependencies_done(task: &Task, tasks: &[Task]) -> bool {
    task.dependencies.iter().all(|dep| {
        match tasks.iter().find(|t| t.id == *dep) {
            Some(t) => t.is_done(),
            None => {
                debug!(task = %task.id, dependency = %dep, "dependency has no record");
                false
            }
        }
    })
}

/// Pick the task to work on next.
///
/// With an `id`, that task is returned whatever its status. Otherwise the
/// first pending task whose dependencies are all done; failing that, the
/// first pending task regardless of dependencies. `None` only when no
/// task is pending.
///
/// # Errors
///
/// Returns `TaskNotFound` if `id` is given and no task has it.
pub fn next_actionable<'a>(tasks: &'a [Task], id: Option<&str>) -> Result<Option<&'a Task>> {
    if let Some(id) = id {
        return tasks
            .iter()
            .find(|t| t.id == id)
            .map(Some)
            .ok_or_else(|| task_not_found(id, tasks));
    }

    let mut pending = tasks.iter().filter(|t| t.status == TaskStatus::Pending).peekable();
    let first_pending = pending.peek().copied();

    if let Some(ready) = pending.find(|t| dependencies_done(t, tasks)) {
        return Ok(Some(ready));
    }

    if let Some(task) = first_pending {
        debug!(id = %task.id, "no pending task has all dependencies done; falling back to first pending");
    }
    Ok(first_pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn task(id: &str, status: TaskStatus, deps: &[&str]) -> Task {
        Task::new(id, format!("Task {id}"), "tasks.md")
            .with_status(status)
            .with_dependencies(deps.iter().copied())
    }

    fn store_with(temp_dir: &TempDir, tasks: Vec<Task>) -> TaskStore {
        let store = TaskStore::with_tasks(&temp_dir.path().join("tasks.csv"), tasks);
        store.save().unwrap();
        store
    }

    #[test]
    fn test_set_status_updates_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, vec![task("1", TaskStatus::Pending, &[])]);
        let before = store.tasks()[0].updated_at;

        let updated = set_status(&mut store, "1", TaskStatus::Done, None).unwrap();

        assert_eq!(updated.status, TaskStatus::Done);
        assert!(updated.updated_at >= before);
        let reopened = TaskStore::open(store.path()).unwrap();
        assert_eq!(reopened.tasks()[0].status, TaskStatus::Done);
    }

    #[test]
    fn test_set_status_unknown_id_leaves_file_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, vec![task("1", TaskStatus::Pending, &[])]);
        let before = std::fs::read(store.path()).unwrap();

        let err = set_status(&mut store, "42", TaskStatus::Done, None).unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
        assert_eq!(store.tasks()[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_set_status_disambiguates_by_source_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut other = task("1", TaskStatus::Pending, &[]);
        other.source_path = "other.md".to_string();
        let mut store = store_with(&temp_dir, vec![task("1", TaskStatus::Pending, &[]), other]);

        set_status(&mut store, "1", TaskStatus::Blocked, Some("other.md")).unwrap();

        assert_eq!(store.tasks()[0].status, TaskStatus::Pending);
        assert_eq!(store.tasks()[1].status, TaskStatus::Blocked);
    }

    #[test]
    fn test_set_status_first_match_wins() {
        let temp_dir = TempDir::new().unwrap();
        let mut other = task("1", TaskStatus::Pending, &[]);
        other.source_path = "other.md".to_string();
        let mut store = store_with(&temp_dir, vec![task("1", TaskStatus::Pending, &[]), other]);

        set_status(&mut store, "1", TaskStatus::Done, None).unwrap();

        assert_eq!(store.tasks()[0].status, TaskStatus::Done);
        assert_eq!(store.tasks()[1].status, TaskStatus::Pending);
    }

    #[test]
    fn test_mark_in_progress_and_show() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, vec![task("5", TaskStatus::Pending, &[])]);

        let shown = mark_in_progress_and_show(&mut store, "5", None).unwrap();
        assert_eq!(shown.id, "5");
        assert_eq!(shown.status, TaskStatus::InProgress);

        assert!(mark_in_progress_and_show(&mut store, "6", None).is_err());
    }

    #[test]
    fn test_list_tasks_filters() {
        let tasks = vec![
            task("1", TaskStatus::Done, &[]).with_category("Backend"),
            task("2", TaskStatus::Pending, &[]).with_category("backend"),
            task("3", TaskStatus::Done, &[]).with_category("Frontend"),
        ];

        let all = list_tasks(&tasks, &TaskFilter::default());
        assert_eq!(all.len(), 3);

        let done = list_tasks(&tasks, &TaskFilter { status: Some(TaskStatus::Done), category: None });
        let ids: Vec<&str> = done.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);

        let not_done: Vec<&Task> = tasks.iter().filter(|t| !done.contains(t)).collect();
        assert!(not_done.iter().all(|t| t.status != TaskStatus::Done));
        assert_eq!(done.len() + not_done.len(), tasks.len());

        let backend = list_tasks(
            &tasks,
            &TaskFilter { status: None, category: Some("BACKEND".into()) },
        );
        assert_eq!(backend.len(), 2);

        let both = list_tasks(
            &tasks,
            &TaskFilter { status: Some(TaskStatus::Done), category: Some("backend".into()) },
        );
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, "1");
    }

    #[test]
    fn test_progress_summary() {
        let tasks = vec![
            task("1", TaskStatus::Done, &[]).with_category("Backend"),
            task("2", TaskStatus::InProgress, &[]).with_category("Backend"),
            task("3", TaskStatus::Blocked, &[]).with_category("Api"),
            task("4", TaskStatus::Pending, &[]).with_category("Api"),
        ];

        let summary = progress_summary(&tasks);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.done, 1);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.pending, 1);
        assert!((summary.percent - 25.0).abs() < f64::EPSILON);

        let names: Vec<&str> = summary.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["Api", "Backend"]);
        assert_eq!(summary.categories[1].done, 1);
        assert!((summary.categories[1].percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_summary_empty_store() {
        let summary = progress_summary(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.percent.abs() < f64::EPSILON);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn test_next_actionable_respects_dependencies() {
        let tasks = vec![
            task("1", TaskStatus::Done, &[]),
            task("2", TaskStatus::Pending, &["1"]),
            task("3", TaskStatus::Pending, &["2"]),
        ];

        let next = next_actionable(&tasks, None).unwrap().unwrap();
        assert_eq!(next.id, "2");
    }

    #[test]
    fn test_next_actionable_skips_blocked_candidates() {
        let tasks = vec![
            task("1", TaskStatus::InProgress, &[]),
            task("2", TaskStatus::Pending, &["1"]),
            task("3", TaskStatus::Pending, &[]),
        ];

        let next = next_actionable(&tasks, None).unwrap().unwrap();
        assert_eq!(next.id, "3");
    }

    #[test]
    fn test_next_actionable_falls_back_to_first_pending() {
        let tasks = vec![task("1", TaskStatus::Pending, &["99"])];

        let next = next_actionable(&tasks, None).unwrap().unwrap();
        assert_eq!(next.id, "1");
    }

    #[test]
    fn test_next_actionable_resolves_dependency_across_documents() {
        let mut elsewhere = task("1", TaskStatus::Done, &[]);
        elsewhere.source_path = "a.md".to_string();
        let tasks = vec![
            elsewhere,
            task("2", TaskStatus::Pending, &["1"]),
            task("3", TaskStatus::Pending, &[]),
        ];

        let next = next_actionable(&tasks, None).unwrap().unwrap();
        assert_eq!(next.id, "2");
    }

    #[test]
    fn test_next_actionable_dependency_uses_first_matching_record() {
        let mut first = task("1", TaskStatus::InProgress, &[]);
        first.source_path = "a.md".to_string();
        let tasks = vec![
            first,
            task("1", TaskStatus::Done, &[]),
            task("2", TaskStatus::Pending, &["1"]),
            task("3", TaskStatus::Pending, &[]),
        ];

        let next = next_actionable(&tasks, None).unwrap().unwrap();
        assert_eq!(next.id, "3");
    }

    #[test]
    fn test_next_actionable_nothing_pending() {
        let tasks = vec![task("1", TaskStatus::Done, &[]), task("2", TaskStatus::Blocked, &[])];
        assert!(next_actionable(&tasks, None).unwrap().is_none());
        assert!(next_actionable(&[], None).unwrap().is_none());
    }

    #[test]
    fn test_next_actionable_by_id_ignores_status() {
        let tasks = vec![task("1", TaskStatus::Done, &[])];

        let found = next_actionable(&tasks, Some("1")).unwrap().unwrap();
        assert_eq!(found.status, TaskStatus::Done);

        let err = next_actionable(&tasks, Some("2")).unwrap_err();
        assert!(matches!(err, Error::TaskNotFoundSimilar { .. } | Error::TaskNotFound { .. }));
    }
}
