//! `places dedup` command implementation
//!
//! Removes repeated rows from a CSV file in place.

use crate::dedup::dedup_file;
use crate::error::Result;
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Deduplicate `file`
pub fn run(file: &Path, verbose: bool) -> Result<()> {
    info!(path = %file.display(), "Deduplicating");

    let summary = super::with_reporter(verbose, "Deduplicating", |reporter| {
        dedup_file(file, reporter)
    })?;

    println!("{} Deduplicated {}", "✓".green(), file.display().to_string().cyan());
    println!("  Rows read:          {}", summary.rows_read);
    println!("  Rows kept:          {}", summary.rows_written);
    println!(
        "  Duplicates removed: {}",
        summary.duplicates_removed.to_string().yellow()
    );

    Ok(())
}
