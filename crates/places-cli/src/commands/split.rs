//! `places split` command implementation
//!
//! Splits a large CSV into numbered partitions, each with its own header.

use crate::error::Result;
use crate::progress::format_bytes;
use crate::split::{split_file, SplitOptions, SplitSummary};
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Split `source` into `output_dir`
pub fn run(source: &Path, output_dir: &Path, options: SplitOptions, verbose: bool) -> Result<()> {
    info!(
        source = %source.display(),
        output_dir = %output_dir.display(),
        max_rows = options.max_rows,
        prefix = %options.prefix,
        "Splitting"
    );

    let summary = super::with_reporter(verbose, "Splitting", |reporter| {
        split_file(source, output_dir, &options, reporter)
    })?;

    print_summary(source, output_dir, &summary);
    Ok(())
}

fn print_summary(source: &Path, output_dir: &Path, summary: &SplitSummary) {
    if summary.parts.is_empty() {
        println!(
            "{} {} has no data rows; nothing written",
            "ℹ".cyan(),
            source.display()
        );
        return;
    }

    println!(
        "{} Split {} rows into {} file(s) in {}",
        "✓".green(),
        summary.total_rows,
        summary.parts.len(),
        output_dir.display().to_string().cyan()
    );

    for part in &summary.parts {
        let size = fs::metadata(&part.path).map(|m| m.len()).unwrap_or(0);
        println!(
            "  {:<20} {:>10} rows  {:>10}",
            part.path.file_name().unwrap_or_default().to_string_lossy(),
            part.rows,
            format_bytes(size)
        );
    }
}
