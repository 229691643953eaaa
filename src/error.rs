//! Error types for spec-tracker.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=store, 3=not_found, 4=validation, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for `--json` consumers
//!
//! Malformed document content is never an error: the parser substitutes
//! defaults instead. Only missing inputs, invalid statuses, store and I/O
//! failures surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for spec-tracker operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Store (exit 2)
    StoreError,

    // Not Found (exit 3)
    DocumentNotFound,
    TaskNotFound,

    // Validation (exit 4)
    InvalidStatus,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::StoreError => "STORE_ERROR",
            Self::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::StoreError => 2,
            Self::DocumentNotFound | Self::TaskNotFound => 3,
            Self::InvalidStatus => 4,
            Self::IoError | Self::JsonError => 8,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in spec-tracker operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("Task #{id} not found")]
    TaskNotFound { id: String },

    #[error("Task #{id} not found (did you mean: {}?)", similar.join(", "))]
    TaskNotFoundSimilar { id: String, similar: Vec<String> },

    #[error("Invalid status '{value}'. Valid statuses: pending, in_progress, done, blocked")]
    InvalidStatus {
        value: String,
        suggestion: Option<String>,
    },

    #[error("Store error: {0}")]
    Store(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::DocumentNotFound { .. } => ErrorCode::DocumentNotFound,
            Self::TaskNotFound { .. } | Self::TaskNotFoundSimilar { .. } => ErrorCode::TaskNotFound,
            Self::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            Self::Store(_) => ErrorCode::StoreError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::DocumentNotFound { .. } => {
                Some("Pass the path to a tasks.md document: st extract <document>".to_string())
            }

            Self::TaskNotFound { .. } => Some(
                "Use `st list` to see tracked tasks, or `st extract <document>` if the store is empty."
                    .to_string(),
            ),
            Self::TaskNotFoundSimilar { similar, .. } => {
                Some(format!("Did you mean: {}?", similar.join(", ")))
            }

            Self::InvalidStatus { suggestion, .. } => Some(match suggestion {
                Some(s) => format!("Did you mean '{s}'?"),
                None => "Valid statuses: pending, in_progress, done, blocked".to_string(),
            }),

            Self::Store(_) => Some(
                "The store file could not be parsed. Check it has the header \
                 task_id,title,category,status,complexity,estimated_time,dependencies,spec_path,updated_at,notes"
                    .to_string(),
            ),

            Self::Io(_) | Self::Json(_) | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::TaskNotFound { id: "7".into() }.exit_code(), 3);
        assert_eq!(Error::DocumentNotFound { path: "tasks.md".into() }.exit_code(), 3);
        assert_eq!(
            Error::InvalidStatus { value: "finished".into(), suggestion: None }.exit_code(),
            4
        );
        assert_eq!(Error::Other("boom".into()).exit_code(), 1);
    }

    #[test]
    fn test_io_and_json_errors_share_exit_code() {
        let io = Error::from(std::io::Error::other("disk full"));
        let json = Error::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());

        assert_eq!(io.error_code(), ErrorCode::IoError);
        assert_eq!(json.error_code(), ErrorCode::JsonError);
        assert_eq!(io.exit_code(), 8);
        assert_eq!(json.exit_code(), 8);
        assert!(io.hint().is_none());
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let err = Error::TaskNotFoundSimilar {
            id: "12".into(),
            similar: vec!["11".into(), "13".into()],
        };
        let json = err.to_structured_json();

        assert_eq!(json["error"]["code"], "TASK_NOT_FOUND");
        assert_eq!(json["error"]["exit_code"], 3);
        assert_eq!(json["error"]["hint"], "Did you mean: 11, 13?");
    }

    #[test]
    fn test_invalid_status_hint_uses_suggestion() {
        let err = Error::InvalidStatus {
            value: "don".into(),
            suggestion: Some("done".into()),
        };
        assert_eq!(err.hint().as_deref(), Some("Did you mean 'done'?"));
        assert!(err.to_string().contains("'don'"));
    }
}
