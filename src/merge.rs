//! Reconciling a fresh extraction with the stored status.
//!
//! Two steps, kept separate on purpose:
//!
//! 1. [`merge`] maps one document's freshly parsed tasks onto the stored
//!    records with the same `(id, source_path)` key. Its output is exactly
//!    the fresh slice.
//! 2. [`combine`] puts that slice back into the full store, keeping every
//!    record that belongs to other documents and any stale record of this
//!    document. Saving the output of `merge` alone would drop them.

use crate::model::Task;
use std::collections::{HashMap, HashSet};

/// Apply stored status to freshly parsed tasks.
///
/// For each fresh task with a stored counterpart, status, notes and
/// `updated_at` come from the store; title, category, complexity,
/// estimated time and dependencies come from the document. Unmatched
/// fresh tasks pass through unchanged.
#[must_use]
pub fn merge(existing: &[Task], fresh: Vec<Task>) -> Vec<Task> {
    let by_key: HashMap<(&str, &str), &Task> = existing
        .iter()
        .rev() // first stored record wins on duplicate keys
        .map(|t| (t.key(), t))
        .collect();

    fresh
        .into_iter()
        .map(|mut task| {
            let stored = by_key.get(&task.key()).copied();
            if let Some(stored) = stored {
                task.status = stored.status;
                task.notes.clone_from(&stored.notes);
                task.updated_at = stored.updated_at;
            }
            task
        })
        .collect()
}

/// Splice a merged document slice into the full store.
///
/// Records of other documents keep their positions. The merged slice takes
/// the place of the document's first stored record, or is appended when
/// the document is new. Stored records of this document that are absent
/// from the slice follow it, unchanged.
#[must_use]
pub fn combine(existing: Vec<Task>, merged: Vec<Task>, source_path: &str) -> Vec<Task> {
    let merged_keys: HashSet<(String, String)> = merged
        .iter()
        .map(|t| (t.id.clone(), t.source_path.clone()))
        .collect();

    let mut out = Vec::with_capacity(existing.len() + merged.len());
    let mut merged = Some(merged);
    let mut slice_end = None;
    let mut stale = Vec::new();

    for task in existing {
        if task.source_path != source_path {
            out.push(task);
            continue;
        }
        if let Some(slice) = merged.take() {
            out.extend(slice);
            slice_end = Some(out.len());
        }
        if !merged_keys.contains(&(task.id.clone(), task.source_path.clone())) {
            stale.push(task);
        }
    }

    if let Some(slice) = merged {
        out.extend(slice);
        out.append(&mut stale);
    } else if let Some(end) = slice_end {
        let tail = out.split_off(end);
        out.extend(stale);
        out.extend(tail);
    }

    out
}
