//! Input validation for command arguments.
//!
//! Status values are checked against the fixed four-value set before any
//! store is touched. Near misses get a suggestion from edit distance, so a
//! typo like `in-progres` points at `in_progress` instead of just failing.

use crate::error::{Error, Result};
use crate::model::TaskStatus;

/// Parse a status argument.
///
/// Matching is case-insensitive and accepts `-` or a space in place of `_`.
/// Anything outside the four statuses is rejected, with the closest valid
/// status as a suggestion when one is within edit distance 3.
pub fn parse_status(input: &str) -> Result<TaskStatus> {
    let normalized = input.trim().to_lowercase().replace(['-', ' '], "_");

    if let Some(status) = TaskStatus::ALL
        .into_iter()
        .find(|s| s.as_str() == normalized)
    {
        return Ok(status);
    }

    let suggestion = TaskStatus::ALL
        .iter()
        .map(|s| (levenshtein_distance(&normalized, s.as_str()), s.as_str()))
        .filter(|(dist, _)| *dist <= 3)
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, s)| s.to_string());

    Err(Error::InvalidStatus {
        value: input.to_string(),
        suggestion,
    })
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single-row optimization
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Find existing task ids similar to the searched id.
///
/// Returns up to `max` distinct suggestions with edit distance ≤ 2,
/// sorted by distance then by id.
pub fn find_similar_ids<'a, I>(searched: &str, existing: I, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates: Vec<(usize, &str)> = existing
        .into_iter()
        .filter(|id| *id != searched)
        .map(|id| (levenshtein_distance(searched, id), id))
        .filter(|(dist, _)| *dist <= 2)
        .collect();

    candidates.sort_unstable();
    candidates.dedup_by(|a, b| a.1 == b.1);

    candidates
        .into_iter()
        .take(max)
        .map(|(_, id)| id.to_string())
        .collect()
}
