//! Status-change command implementations (`done`, `status`).

use super::{TaskView, open_store, status_label};
use crate::cli::TaskArgs;
use crate::error::Result;
use crate::model::TaskStatus;
use crate::tracker::{find_task, set_status};
use crate::validate::parse_status;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StatusOutput<'a> {
    task: TaskView<'a>,
    previous_status: TaskStatus,
    dry_run: bool,
}

/// Execute the `done` command.
///
/// # Errors
///
/// Returns `TaskNotFound` if no task matches, or an I/O error.
pub fn execute_done(args: &TaskArgs, store_path: Option<&Path>, json: bool) -> Result<()> {
    apply(&args.id, TaskStatus::Done, args.spec.as_deref(), store_path, json)
}

/// Execute the `status` command.
///
/// The status is validated before the store is opened.
///
/// # Errors
///
/// Returns `InvalidStatus` for an unknown status, `TaskNotFound` if no task
/// matches, or an I/O error.
pub fn execute(
    id: &str,
    status: &str,
    spec: Option<&str>,
    store_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let status = parse_status(status)?;
    apply(id, status, spec, store_path, json)
}

fn apply(
    id: &str,
    status: TaskStatus,
    spec: Option<&str>,
    store_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let mut store = open_store(store_path)?;
    let current = find_task(store.tasks(), id, spec)?;
    let previous_status = current.status;

    if crate::is_dry_run() {
        if json {
            let output = StatusOutput {
                task: TaskView::from(current),
                previous_status,
                dry_run: true,
            };
            println!("{}", serde_json::to_string(&output)?);
        } else {
            println!(
                "Would mark Task #{id} as {} (currently {})",
                status_label(status),
                status_label(previous_status)
            );
        }
        return Ok(());
    }

    let task = set_status(&mut store, id, status, spec)?;

    if json {
        let output = StatusOutput {
            task: TaskView::from(&task),
            previous_status,
            dry_run: false,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("✅ Task #{id} marked as {}", status_label(status));
    }

    Ok(())
}
