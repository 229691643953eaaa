//! spec-tracker - implementation progress for `tasks.md` documents
//!
//! This crate provides the core functionality for the `st` CLI tool.
//!
//! # Architecture
//!
//! - [`parser`] - Best-effort task extraction from markdown
//! - [`storage`] - CSV task store (load, atomic save, hashing)
//! - [`merge`] - Carrying stored status across re-extraction
//! - [`tracker`] - Status updates, filtering, progress, next-task selection
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Task, TaskStatus)
//! - [`config`] - Store path resolution
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod parser;
pub mod storage;
pub mod tracker;
pub mod validate;

pub use error::{Error, Result};

/// Global dry-run flag for `--dry-run`.
///
/// When set, mutating commands preview what would happen without writing.
pub static DRY_RUN: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if dry-run mode is active.
#[inline]
pub fn is_dry_run() -> bool {
    DRY_RUN.load(std::sync::atomic::Ordering::Relaxed)
}
