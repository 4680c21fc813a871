//! `places expand` command implementation

use crate::error::Result;
use crate::expand::{expand_file, ExpandOptions};
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Expand house-number ranges of `source` into `destination`
pub fn run(source: &Path, destination: &Path, column: String, verbose: bool) -> Result<()> {
    info!(
        source = %source.display(),
        destination = %destination.display(),
        column = %column,
        "Expanding house-number ranges"
    );

    let options = ExpandOptions { column };
    let summary = super::with_reporter(verbose, "Expanding", |reporter| {
        expand_file(source, destination, &options, reporter)
    })?;

    println!(
        "{} Expanded {} into {}",
        "✓".green(),
        source.display(),
        destination.display().to_string().cyan()
    );
    println!("  Rows read:          {}", summary.rows_read);
    println!("  Ranges expanded:    {}", summary.ranges_expanded);
    println!("  Rows written:       {}", summary.rows_written);
    if summary.duplicates_removed > 0 {
        println!(
            "  Duplicates removed: {}",
            summary.duplicates_removed.to_string().yellow()
        );
    }

    Ok(())
}
