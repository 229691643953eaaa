//! Progress command implementation.

use super::{EMPTY_STORE_MESSAGE, open_store};
use crate::error::Result;
use crate::tracker::{ProgressSummary, progress_summary};
use colored::Colorize;
use std::path::Path;

/// Execute the progress command.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn execute(store_path: Option<&Path>, json: bool) -> Result<()> {
    let store = open_store(store_path)?;
    let summary = progress_summary(store.tasks());

    if json {
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("{EMPTY_STORE_MESSAGE}");
        return Ok(());
    }

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ProgressSummary) {
    let rule = "=".repeat(50);

    println!();
    println!("{}", "📊 Task Progress Summary".bold());
    println!("{rule}");
    println!("Total Tasks:     {}", summary.total);
    println!(
        "✅ Done:         {} ({:.1}%)",
        summary.done.to_string().green(),
        summary.percent
    );
    println!("🔄 In Progress:  {}", summary.in_progress.to_string().cyan());
    println!("⏳ Pending:      {}", summary.pending.to_string().yellow());
    println!("🚫 Blocked:      {}", summary.blocked.to_string().red());
    println!();
    println!("Overall Progress: {}", format!("{:.1}%", summary.percent).bold());
    println!("{rule}");

    if !summary.categories.is_empty() {
        println!();
        println!("{}", "📦 Progress by Category:".bold());
        for category in &summary.categories {
            println!(
                "  {}: {}/{} ({:.1}%)",
                category.category, category.done, category.total, category.percent
            );
        }
    }
}
