//! Task model for spec-tracker.
//!
//! A task is one unit of trackable work extracted from a `tasks.md`
//! document. Its identity is the `(id, source_path)` pair; everything else
//! is either refreshed from the document or owned by the operator.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Task status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Blocked,
}

impl TaskStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::Done, Self::Blocked];

    /// Get the string representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }

    /// Icon used in human-readable listings.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Pending => "⏳",
            Self::InProgress => "🔄",
            Self::Done => "✅",
            Self::Blocked => "🚫",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task record.
///
/// Field order matches the store's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Numeric identifier from the `### Task #N:` heading, kept as text
    #[serde(rename = "task_id")]
    pub id: String,

    /// Task title
    pub title: String,

    /// Free-text category (`Unknown` when the document has none)
    pub category: String,

    /// Current status
    pub status: TaskStatus,

    /// Free-text complexity
    pub complexity: String,

    /// Free-text time estimate
    pub estimated_time: String,

    /// Ids of tasks in the same document this task depends on
    #[serde(
        serialize_with = "dependency_list::serialize",
        deserialize_with = "dependency_list::deserialize"
    )]
    pub dependencies: Vec<String>,

    /// Path of the document this task was extracted from
    #[serde(rename = "spec_path")]
    pub source_path: String,

    /// Last status change (or first extraction)
    #[serde(
        serialize_with = "timestamp::serialize",
        deserialize_with = "timestamp::deserialize"
    )]
    pub updated_at: DateTime<Utc>,

    /// Operator notes, preserved across re-extraction
    #[serde(default)]
    pub notes: String,
}

impl Task {
    /// Identity key within a store.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.id, &self.source_path)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Dependencies rendered the way the store writes them.
    #[must_use]
    pub fn dependencies_display(&self) -> String {
        dependency_list::join(&self.dependencies)
    }
}

#[cfg(test)]
impl Task {
    /// Create a pending task with placeholder metadata.
    pub fn new(id: impl Into<String>, title: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: UNKNOWN.to_string(),
            status: TaskStatus::Pending,
            complexity: UNKNOWN.to_string(),
            estimated_time: UNKNOWN.to_string(),
            dependencies: Vec::new(),
            source_path: source_path.into(),
            updated_at: Utc::now(),
            notes: String::new(),
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the dependencies.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }
}

/// Placeholder for metadata the document does not provide.
pub const UNKNOWN: &str = "Unknown";

/// Serialized form of an empty dependency list.
pub const NO_DEPENDENCIES: &str = "None";

mod dependency_list {
    use super::{Deserialize, Deserializer, NO_DEPENDENCIES, Serializer};

    pub(super) fn join(deps: &[String]) -> String {
        if deps.is_empty() {
            NO_DEPENDENCIES.to_string()
        } else {
            deps.join(", ")
        }
    }

    pub(super) fn split(raw: &str) -> Vec<String> {
        let raw = raw.trim();
        if raw.is_empty() || raw == NO_DEPENDENCIES {
            return Vec::new();
        }
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S: Serializer>(deps: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&join(deps))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(split(&raw))
    }
}

mod timestamp {
    use super::{DateTime, Deserialize, Deserializer, NaiveDateTime, SecondsFormat, Serializer, Utc};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    /// Accepts RFC 3339, or a naive ISO-8601 timestamp read as UTC.
    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
