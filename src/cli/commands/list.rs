//! List command implementation.

use super::{EMPTY_STORE_MESSAGE, TaskView, open_store, print_task_summary};
use crate::cli::ListArgs;
use crate::error::Result;
use crate::tracker::{TaskFilter, list_tasks};
use crate::validate::parse_status;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ListOutput<'a> {
    tasks: Vec<TaskView<'a>>,
    count: usize,
}

/// Execute the list command.
///
/// # Errors
///
/// Returns `InvalidStatus` for an unknown `--status` value, or an error if
/// the store cannot be read.
pub fn execute(args: &ListArgs, store_path: Option<&Path>, json: bool) -> Result<()> {
    let filter = TaskFilter {
        status: args.status.as_deref().map(parse_status).transpose()?,
        category: args.category.clone(),
    };

    let store = open_store(store_path)?;
    let tasks = list_tasks(store.tasks(), &filter);

    if json {
        let output = ListOutput {
            count: tasks.len(),
            tasks: tasks.into_iter().map(TaskView::from).collect(),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("{EMPTY_STORE_MESSAGE}");
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks match the filter criteria.");
        return Ok(());
    }

    println!();
    println!("{}", format!("📋 Tasks ({} found)", tasks.len()).bold());
    println!("{}", "=".repeat(80));
    for task in tasks {
        print_task_summary(task);
    }

    Ok(())
}
