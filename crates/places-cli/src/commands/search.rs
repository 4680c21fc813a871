//! Search command implementation
//!
//! Finds every record with a given postal code across a directory of CSV
//! files and prints them in the requested format.

use crate::error::Result;
use crate::progress::create_spinner;
use crate::report::TracingReporter;
use crate::search::{search_directory, SearchMatch, SearchOptions, SearchResult};
use crate::OutputFormat;
use colored::Colorize;
use places_common::Record;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Maximum width of a table cell before truncation
const MAX_CELL_WIDTH: usize = 40;

/// Run the search command
///
/// # Arguments
///
/// * `dir` - Directory whose `.csv` files are scanned
/// * `target` - Postal code to look for
/// * `column` - Column compared against `target`
/// * `format` - Output format (compact, table, json)
pub fn run(
    dir: &Path,
    target: String,
    column: String,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    debug!(
        dir = %dir.display(),
        postal_code = %target,
        column = %column,
        format = ?format,
        "Starting search"
    );

    let options = SearchOptions::postal_code(target).with_column(column);

    let spinner = super::show_progress(verbose)
        .then(|| create_spinner(&format!("Searching {}...", dir.display())));
    let result = search_directory(dir, &options, &TracingReporter);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let result = result?;

    match format {
        OutputFormat::Compact => display_compact(&result),
        OutputFormat::Table => display_table(&result),
        OutputFormat::Json => display_json(&result)?,
    }

    print_count(&result, &options, format);
    Ok(())
}

/// Display results in compact format (one per line)
fn display_compact(result: &SearchResult) {
    for found in &result.matches {
        println!("{}: {}", file_name(found), found.record);
    }
}

/// Display results in table format
fn display_table(result: &SearchResult) {
    use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

    if result.is_empty() {
        return;
    }

    // header of the first match; files may disagree, rows are padded or cut
    let columns: Vec<String> = result.matches[0]
        .record
        .fields()
        .map(|(name, _)| name.to_string())
        .collect();

    let mut header = vec!["file".to_string()];
    header.extend(columns.iter().cloned());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header);

    for found in &result.matches {
        let mut row = vec![file_name(found)];
        row.extend(columns.iter().map(|name| {
            found
                .record
                .get(name)
                .map(|value| truncate_string(value, MAX_CELL_WIDTH))
                .unwrap_or_else(|| "-".to_string())
        }));
        table.add_row(row);
    }

    println!();
    println!("{}", table);
    println!();
}

#[derive(Serialize)]
struct JsonMatch<'a> {
    file: String,
    record: &'a Record,
}

/// Display results in JSON format
fn display_json(result: &SearchResult) -> Result<()> {
    let matches: Vec<JsonMatch<'_>> = result
        .matches
        .iter()
        .map(|found| JsonMatch {
            file: found.file.display().to_string(),
            record: &found.record,
        })
        .collect();
    let json = serde_json::to_string_pretty(&matches)?;
    println!("{}", json);
    Ok(())
}

/// Print the match count; to stderr for JSON so stdout stays parseable
fn print_count(result: &SearchResult, options: &SearchOptions, format: OutputFormat) {
    let line = if result.is_empty() {
        format!(
            "{} No records with {} = {} in {} file(s)",
            "✗".red(),
            options.column,
            options.target,
            result.files_scanned
        )
    } else {
        format!(
            "{} Found {} record(s) with {} = {} in {} file(s)",
            "✓".green(),
            result.len(),
            options.column,
            options.target.cyan(),
            result.files_scanned
        )
    };

    match format {
        OutputFormat::Json => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

fn file_name(found: &SearchMatch) -> String {
    found
        .file
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Truncate a string to a maximum length with ellipsis
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
