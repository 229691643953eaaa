//! Extract command implementation.

use super::open_store;
use crate::error::{Error, Result};
use crate::merge::{combine, merge};
use crate::model::Task;
use crate::parser::parse_document;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct ExtractOutput<'a> {
    document: &'a str,
    store: String,
    extracted: usize,
    new: usize,
    total: usize,
    changed: bool,
    dry_run: bool,
    content_hash: String,
}

/// Execute the extract command.
///
/// Parses `document`, carries stored status over to tasks already known,
/// splices the result into the store and rewrites it if anything changed.
///
/// # Errors
///
/// Returns `DocumentNotFound` if the document does not exist, or an error
/// if the store cannot be read or written.
pub fn execute(document: &Path, store_path: Option<&Path>, json: bool) -> Result<()> {
    if !document.is_file() {
        return Err(Error::DocumentNotFound {
            path: document.to_path_buf(),
        });
    }

    if !json {
        println!("Extracting tasks from {}...", document.display());
    }

    let text = std::fs::read_to_string(document)?;
    let source_path = document.to_string_lossy().to_string();
    let fresh = parse_document(&text, &source_path, Utc::now());
    if fresh.is_empty() {
        warn!(document = %source_path, "no task headings found");
    }

    let mut store = open_store(store_path)?;
    let before = store.content_hash();
    let existing = store.take();

    let known: HashSet<(&str, &str)> = existing.iter().map(Task::key).collect();
    let new = fresh.iter().filter(|t| !known.contains(&t.key())).count();
    let extracted = fresh.len();

    let merged = merge(&existing, fresh);
    store.replace(combine(existing, merged, &source_path));

    let content_hash = store.content_hash();
    let changed = content_hash != before || !store.path().exists();
    let dry_run = crate::is_dry_run();

    if changed && !dry_run {
        store.save()?;
        info!(store = %store.path().display(), extracted, new, "store updated");
    } else {
        debug!(changed, dry_run, "store not written");
    }

    if json {
        let output = ExtractOutput {
            document: &source_path,
            store: store.path().display().to_string(),
            extracted,
            new,
            total: store.len(),
            changed,
            dry_run,
            content_hash,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if dry_run {
        println!(
            "Would extract {extracted} tasks ({new} new) to {}",
            store.path().display()
        );
        println!("   Total tasks in store: {}", store.len());
    } else {
        println!("✅ Extracted {extracted} tasks to {}", store.path().display());
        if new > 0 {
            println!("   New tasks: {new}");
        }
        if !changed {
            println!("   Store already up to date");
        }
        println!("   Total tasks in store: {}", store.len());
    }

    Ok(())
}
