//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// spec-tracker - Track implementation progress of tasks.md documents
#[derive(Parser, Debug)]
#[command(name = "st", author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store path (default: nearest .spec-tracker/tasks.csv)
    #[arg(long, global = true, env = "ST_STORE")]
    pub store: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Preview changes without writing the store
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no log output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract tasks from a tasks.md document into the store
    Extract {
        /// Path to the tasks.md document
        document: PathBuf,

        /// Store path
        #[arg(value_name = "STORE")]
        store_path: Option<PathBuf>,
    },

    /// Mark a task as done
    Done(TaskArgs),

    /// Set a task's status (pending, in_progress, done, blocked)
    Status {
        /// Task id (the N in "Task #N")
        id: String,

        /// New status
        status: String,

        /// Store path
        #[arg(value_name = "STORE")]
        store_path: Option<PathBuf>,

        /// Only match tasks from this document
        #[arg(long)]
        spec: Option<String>,
    },

    /// Show progress statistics
    Progress {
        /// Store path
        #[arg(value_name = "STORE")]
        store_path: Option<PathBuf>,
    },

    /// List tasks, optionally filtered
    List(ListArgs),

    /// Show the next task ready for implementation
    Next {
        /// Store path
        #[arg(value_name = "STORE")]
        store_path: Option<PathBuf>,
    },

    /// Mark a task in progress and show its details
    Implement(TaskArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

/// Arguments for commands addressing a single task.
#[derive(Args, Debug)]
pub struct TaskArgs {
    /// Task id (the N in "Task #N")
    pub id: String,

    /// Store path
    #[arg(value_name = "STORE")]
    pub store_path: Option<PathBuf>,

    /// Only match tasks from this document
    #[arg(long)]
    pub spec: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by category (case-insensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Store path
    #[arg(value_name = "STORE")]
    pub store_path: Option<PathBuf>,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
