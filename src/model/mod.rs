//! Data models for spec-tracker.
//!
//! - Task
//! - TaskStatus

pub mod task;

pub use task::{NO_DEPENDENCIES, Task, TaskStatus, UNKNOWN};
