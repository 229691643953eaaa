//! Next-task command implementations (`next`, `implement`).

use super::{EMPTY_STORE_MESSAGE, TaskView, open_store, print_task_detail};
use crate::cli::TaskArgs;
use crate::error::Result;
use crate::tracker::{find_task, mark_in_progress_and_show, next_actionable};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct NextOutput<'a> {
    task: Option<TaskView<'a>>,
}

/// Execute the `next` command.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn execute(store_path: Option<&Path>, json: bool) -> Result<()> {
    let store = open_store(store_path)?;
    let next = next_actionable(store.tasks(), None)?;

    if json {
        let output = NextOutput {
            task: next.map(TaskView::from),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("{EMPTY_STORE_MESSAGE}");
        return Ok(());
    }

    match next {
        Some(task) => print_task_detail(task),
        None => println!("No pending tasks available."),
    }
    Ok(())
}

/// Execute the `implement` command: mark the task in progress, then show it.
///
/// # Errors
///
/// Returns `TaskNotFound` if no task matches (nothing is shown), or an I/O
/// error.
pub fn execute_implement(args: &TaskArgs, store_path: Option<&Path>, json: bool) -> Result<()> {
    let mut store = open_store(store_path)?;

    let task = if crate::is_dry_run() {
        let task = find_task(store.tasks(), &args.id, args.spec.as_deref())?.clone();
        if !json {
            println!("Would mark Task #{} as in_progress", task.id);
        }
        task
    } else {
        mark_in_progress_and_show(&mut store, &args.id, args.spec.as_deref())?
    };

    if json {
        let output = NextOutput {
            task: Some(TaskView::from(&task)),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_task_detail(&task);
    }
    Ok(())
}
