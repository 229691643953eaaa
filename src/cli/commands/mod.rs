//! Command implementations.
//!
//! Each command opens the store fresh, does its work through
//! [`crate::tracker`] or [`crate::merge`], and prints either
//! human-readable text or a single JSON document.

pub mod completions;
pub mod extract;
pub mod list;
pub mod next;
pub mod progress;
pub mod status;
pub mod version;

use crate::config::resolve_store_path;
use crate::error::Result;
use crate::model::{Task, TaskStatus};
use crate::storage::TaskStore;
use chrono::SecondsFormat;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Printed by read commands when the store has no tasks.
pub const EMPTY_STORE_MESSAGE: &str = "No tasks found in store. Run `st extract <document>` first.";

/// Resolve and load the store for this invocation.
fn open_store(explicit: Option<&Path>) -> Result<TaskStore> {
    let path = resolve_store_path(explicit);
    debug!(store = %path.display(), "resolved store path");
    TaskStore::open(&path)
}

/// JSON shape of a task.
///
/// Unlike the store row, dependencies are a list here.
#[derive(Serialize)]
struct TaskView<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
    status: TaskStatus,
    complexity: &'a str,
    estimated_time: &'a str,
    dependencies: &'a [String],
    source_path: &'a str,
    updated_at: String,
    notes: &'a str,
}

impl<'a> From<&'a Task> for TaskView<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: &task.id,
            title: &task.title,
            category: &task.category,
            status: task.status,
            complexity: &task.complexity,
            estimated_time: &task.estimated_time,
            dependencies: &task.dependencies,
            source_path: &task.source_path,
            updated_at: task.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            notes: &task.notes,
        }
    }
}

fn status_label(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Done => status.as_str().green(),
        TaskStatus::InProgress => status.as_str().cyan(),
        TaskStatus::Pending => status.as_str().yellow(),
        TaskStatus::Blocked => status.as_str().red(),
    }
}

/// One entry of `st list`.
fn print_task_summary(task: &Task) {
    println!();
    println!(
        "{} {}",
        task.status.icon(),
        format!("Task #{}: {}", task.id, task.title).bold()
    );
    println!("   Category: {}", task.category);
    println!("   Status: {}", status_label(task.status));
    println!(
        "   Complexity: {} | Time: {}",
        task.complexity, task.estimated_time
    );
    if !task.dependencies.is_empty() {
        println!("   Dependencies: {}", task.dependencies_display());
    }
    if !task.notes.is_empty() {
        println!("   Notes: {}", task.notes);
    }
}

/// Full detail view used by `st next` and `st implement`.
fn print_task_detail(task: &Task) {
    let rule = "=".repeat(80);

    println!();
    println!("{}", "🎯 Task Ready for Implementation".bold());
    println!("{rule}");
    println!();
    println!("{}", format!("Task #{}: {}", task.id, task.title).bold());
    println!("Category: {}", task.category);
    println!("Complexity: {}", task.complexity);
    println!("Estimated Time: {}", task.estimated_time);
    println!("Dependencies: {}", task.dependencies_display());
    println!("Status: {}", status_label(task.status));
    println!("Spec Path: {}", task.source_path);

    if !task.notes.is_empty() {
        println!();
        println!("Notes: {}", task.notes);
    }

    println!();
    println!("{rule}");
    println!();
    println!("To mark this task as done, run:");
    println!("  {}", format!("st done {}", task.id).dimmed());
    println!();
    println!("To mark as in progress, run:");
    println!("  {}", format!("st status {} in_progress", task.id).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_view_keeps_dependency_list() {
        let task = Task::new("2", "Schema", "tasks.md").with_dependencies(["1"]);
        let json = serde_json::to_value(TaskView::from(&task)).unwrap();

        assert_eq!(json["id"], "2");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["dependencies"], serde_json::json!(["1"]));
        assert_eq!(json["source_path"], "tasks.md");
    }
}
