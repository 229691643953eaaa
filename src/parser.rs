//! Task extraction from `tasks.md` documents.
//!
//! A task section starts at a heading line such as
//!
//! ```text
//! ### Task #4: Add retry budget to the uploader
//! ```
//!
//! and runs until the next task heading or the terminal `## 📦` section,
//! whichever comes first. Within a section, metadata is read from
//! `**Label**: value` lines; only `Category`, `Complexity`,
//! `Estimated Time` and `Dependencies` are recognized.
//!
//! Extraction is best-effort. Missing or malformed metadata turns into the
//! placeholder defaults in [`TaskSection::into_task`], never into an error.

use crate::model::{Task, TaskStatus, UNKNOWN};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Prefix of the section that ends task extraction.
pub const TERMINAL_MARKER: &str = "## 📦";

static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^###[ \t]+Task[ \t]+#(\d+):[ \t]*(\S.*?)[ \t]*$").expect("Invalid heading regex pattern")
});

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(Category|Complexity|Estimated Time|Dependencies)\*\*:[ \t]*(\S.*?)[ \t]*$")
        .expect("Invalid label regex pattern")
});

static TASK_REF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Task #(\d+)").expect("Invalid task reference regex pattern"));

/// Raw fields of one task section, before defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskSection<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub category: Option<&'a str>,
    pub complexity: Option<&'a str>,
    pub estimated_time: Option<&'a str>,
    pub dependencies: Option<&'a str>,
}

impl TaskSection<'_> {
    /// Task ids referenced by the `Dependencies` value, in order of
    /// appearance. Duplicates are kept.
    #[must_use]
    pub fn dependency_ids(&self) -> Vec<String> {
        self.dependencies
            .map(|text| {
                TASK_REF_PATTERN
                    .captures_iter(text)
                    .map(|c| c[1].to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Build a pending task, substituting defaults for missing metadata.
    #[must_use]
    pub fn into_task(self, source_path: &str, now: DateTime<Utc>) -> Task {
        let dependencies = self.dependency_ids();
        Task {
            id: self.id.to_string(),
            title: self.title.to_string(),
            category: self.category.unwrap_or(UNKNOWN).to_string(),
            status: TaskStatus::Pending,
            complexity: self.complexity.unwrap_or(UNKNOWN).to_string(),
            estimated_time: self.estimated_time.unwrap_or(UNKNOWN).to_string(),
            dependencies,
            source_path: source_path.to_string(),
            updated_at: now,
            notes: String::new(),
        }
    }
}

/// Lazy iterator over the task sections of a document.
///
/// Parsing holds no state beyond the text, so calling [`sections`] again
/// re-scans from the top.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    lines: std::str::Lines<'a>,
    pending_heading: Option<(&'a str, &'a str)>,
    finished: bool,
}

/// Scan `text` for task sections in document order.
#[must_use]
pub fn sections(text: &str) -> Sections<'_> {
    Sections {
        lines: text.lines(),
        pending_heading: None,
        finished: false,
    }
}

fn heading(line: &str) -> Option<(&str, &str)> {
    let caps = HEADING_PATTERN.captures(line)?;
    let id = caps.get(1)?.as_str();
    let title = caps.get(2)?.as_str();
    Some((id, title))
}

fn is_terminal(line: &str) -> bool {
    line.trim_start().starts_with(TERMINAL_MARKER)
}

impl<'a> Iterator for Sections<'a> {
    type Item = TaskSection<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        // Find the opening heading, skipping any preamble.
        let (id, title) = match self.pending_heading.take() {
            Some(h) => h,
            None => loop {
                let line = self.lines.next()?;
                if is_terminal(line) {
                    self.finished = true;
                    return None;
                }
                if let Some(h) = heading(line) {
                    break h;
                }
            },
        };

        let mut section = TaskSection {
            id,
            title,
            ..TaskSection::default()
        };

        for line in self.lines.by_ref() {
            if is_terminal(line) {
                self.finished = true;
                break;
            }
            if let Some(next) = heading(line) {
                self.pending_heading = Some(next);
                break;
            }
            let Some(caps) = LABEL_PATTERN.captures(line) else {
                continue;
            };
            let (Some(label), Some(value)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let slot = match label.as_str() {
                "Category" => &mut section.category,
                "Complexity" => &mut section.complexity,
                "Estimated Time" => &mut section.estimated_time,
                _ => &mut section.dependencies,
            };
            // First occurrence wins.
            if slot.is_none() {
                *slot = Some(value.as_str());
            }
        }

        Some(section)
    }
}

/// Extract every task in `text`, attributed to `source_path`.
///
/// Returns an empty vector when the document has no task headings.
#[must_use]
pub fn parse_document(text: &str, source_path: &str, now: DateTime<Utc>) -> Vec<Task> {
    sections(text)
        .map(|section| section.into_task(source_path, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Implementation Tasks

Some preamble mentioning Task #99 in passing.

### Task #1: Set up project skeleton

**Category**: Infrastructure
**Complexity**: Low
**Estimated Time**: 2 hours
**Dependencies**: None

Create the workspace.

### Task #2: Database schema

- **Category**: Backend
- **Dependencies**: Task #1 (skeleton), and later Task #1 again

**Complexity**: Medium

### Task #3: API layer
**Category**: Backend
**Estimated Time**: 1 day
**Dependencies**: Requires Task #2 and Task #1
**Category**: Ignored duplicate

## 📦 Deliverables

### Task #4: Not a task, after the terminal marker
";

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_extracts_sections_in_order() {
        let tasks = parse_document(DOC, "tasks.md", fixed_now());
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(tasks[0].title, "Set up project skeleton");
        assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));
        assert!(tasks.iter().all(|t| t.source_path == "tasks.md"));
    }

    #[test]
    fn test_metadata_and_defaults() {
        let tasks = parse_document(DOC, "tasks.md", fixed_now());

        assert_eq!(tasks[0].category, "Infrastructure");
        assert_eq!(tasks[0].complexity, "Low");
        assert_eq!(tasks[0].estimated_time, "2 hours");
        assert!(tasks[0].dependencies.is_empty());

        assert_eq!(tasks[1].category, "Backend");
        assert_eq!(tasks[1].complexity, "Medium");
        assert_eq!(tasks[1].estimated_time, UNKNOWN);

        assert_eq!(tasks[2].category, "Backend");
        assert_eq!(tasks[2].complexity, UNKNOWN);
    }

    #[test]
    fn test_dependencies_scanned_from_free_text() {
        let tasks = parse_document(DOC, "tasks.md", fixed_now());
        assert_eq!(tasks[1].dependencies, ["1", "1"]);
        assert_eq!(tasks[2].dependencies, ["2", "1"]);
    }

    #[test]
    fn test_no_headings_yields_nothing() {
        assert!(parse_document("# Just notes\n\nTask #1 is mentioned.\n", "x.md", fixed_now()).is_empty());
        assert!(parse_document("", "x.md", fixed_now()).is_empty());
    }

    #[test]
    fn test_malformed_labels_are_ignored() {
        let doc = "### Task #7: Lenient\n**Category**:\n**Complexity** Medium\n*Category*: Nope\n";
        let tasks = parse_document(doc, "x.md", fixed_now());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].category, UNKNOWN);
        assert_eq!(tasks[0].complexity, UNKNOWN);
    }

    #[test]
    fn test_heading_without_title_is_not_a_section() {
        let doc = "### Task #1:\n**Category**: Backend\n### Task #2: Real\n";
        let tasks = parse_document(doc, "x.md", fixed_now());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "2");
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first = parse_document(DOC, "tasks.md", fixed_now());
        let second = parse_document(DOC, "tasks.md", fixed_now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_sections_are_lazy() {
        let mut iter = sections(DOC);
        let first = iter.next().unwrap();
        assert_eq!(first.id, "1");
        assert_eq!(first.dependencies, Some("None"));
        assert!(first.dependency_ids().is_empty());
        assert_eq!(iter.count(), 2);
    }
}
