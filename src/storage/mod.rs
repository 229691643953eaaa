//! Flat-file task store.
//!
//! The store is a single CSV file holding every tracked task. Each command
//! loads it whole, works in memory, and mutating commands rewrite it whole.
//! A missing file is an empty store.
//!
//! # Concurrency
//!
//! There is no locking. The tool assumes at most one writer at a time:
//! two commands racing on the same store can lose an update (last rename
//! wins). Writes are atomic, so a reader never sees a torn file.

pub mod file;
pub mod hash;
pub mod table;

pub use file::atomic_write;
pub use hash::content_hash;

use crate::error::Result;
use crate::model::Task;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load all tasks from the store at `path`.
///
/// Returns an empty vector if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<Vec<Task>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store does not exist yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let tasks = table::read(BufReader::new(file))?;
    debug!(path = %path.display(), count = tasks.len(), "loaded store");
    Ok(tasks)
}

/// Write `tasks` to the store at `path`, in the given order.
///
/// Overwrites any existing file and creates parent directories.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save(path: &Path, tasks: &[Task]) -> Result<()> {
    let content = table::encode(tasks)?;
    atomic_write(path, &content)?;
    debug!(path = %path.display(), count = tasks.len(), "saved store");
    Ok(())
}

/// The task store for one command invocation.
///
/// Opened at the start of a command and, for mutating commands, saved at
/// the end. Nothing is cached between invocations.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load the store at `path` (empty if the file does not exist).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            tasks: load(path)?,
        })
    }

    /// Rewrite the whole store file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(&self) -> Result<()> {
        save(&self.path, &self.tasks)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Move the record set out, leaving the store empty.
    pub fn take(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    /// Replace the record set (e.g. after a merge).
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Fingerprint of the current record set.
    #[must_use]
    pub fn content_hash(&self) -> String {
        content_hash(&self.tasks)
    }
}

#[cfg(test)]
impl TaskStore {
    /// Create an in-memory store that will be saved to `path`.
    pub fn with_tasks(path: &Path, tasks: Vec<Task>) -> Self {
        Self {
            path: path.to_path_buf(),
            tasks,
        }
    }
}
