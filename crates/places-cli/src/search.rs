//! Postal-code search across a directory of CSV files
//!
//! Every regular file directly inside the directory whose name ends in
//! `.csv` is read with its first row as header. Records whose search column
//! equals the target exactly (case-sensitive, no trimming) are collected.
//! Files are visited in file-name order.

use crate::error::{CliError, Result};
use crate::report::{Event, Reporter};
use csv::{ReaderBuilder, StringRecord};
use places_common::Record;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File-name suffix of files that are searched
pub const CSV_EXTENSION: &str = ".csv";

/// Default column compared against the search target
pub const DEFAULT_SEARCH_COLUMN: &str = "postal_code";

/// What to look for
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Header name of the column to compare
    pub column: String,
    /// Value the column must equal
    pub target: String,
}

impl SearchOptions {
    /// Search the default `postal_code` column for `target`
    pub fn postal_code(target: impl Into<String>) -> Self {
        Self {
            column: DEFAULT_SEARCH_COLUMN.to_string(),
            target: target.into(),
        }
    }

    /// Compare a different column
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }
}

/// One matching record and the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub file: PathBuf,
    pub record: Record,
}

/// All matches of a directory scan
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Matches in file order, then row order
    pub matches: Vec<SearchMatch>,
    /// Number of CSV files read
    pub files_scanned: usize,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}

/// Scan every CSV file directly inside `dir` for records matching `options`
///
/// # Errors
///
/// - `DirectoryNotFound` if `dir` does not exist or is not a directory
/// - `MissingColumn` if a CSV file's header lacks the search column (an
///   empty file has no header and fails the same way)
/// - `MalformedRow` if a file cannot be parsed
pub fn search_directory(
    dir: impl AsRef<Path>,
    options: &SearchOptions,
    reporter: &dyn Reporter,
) -> Result<SearchResult> {
    let dir = dir.as_ref();
    reporter.report(&Event::SearchStarted {
        dir,
        target: &options.target,
    });

    let mut result = SearchResult::default();
    for path in list_csv_files(dir, reporter)? {
        let matches = search_file(&path, options, reporter)?;
        result.files_scanned += 1;
        result.matches.extend(matches);
    }

    reporter.report(&Event::SearchFinished {
        matches: result.matches.len(),
    });
    Ok(result)
}

/// List the `.csv` files directly inside `dir`, sorted by file name
///
/// Symlinks are followed, so a link named `*.csv` pointing at a regular file
/// is listed. File names need not be valid UTF-8.
pub fn list_csv_files(dir: &Path, reporter: &dyn Reporter) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CliError::DirectoryNotFound(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        reporter.report(&Event::FileChecked { path: &path });

        let is_csv = entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(CSV_EXTENSION.as_bytes());

        // follows symlinks; a dangling `.csv` link is an error, not a skip
        if is_csv && fs::metadata(&path).map_err(|e| CliError::source_io(&path, e))?.is_file() {
            files.push(path);
        } else {
            reporter.report(&Event::FileSkipped { path: &path });
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Collect the matching records of a single file
pub fn search_file(
    path: &Path,
    options: &SearchOptions,
    reporter: &dyn Reporter,
) -> Result<Vec<SearchMatch>> {
    let file = File::open(path).map_err(|e| CliError::source_io(path, e))?;
    reporter.report(&Event::SourceOpened { path });

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| CliError::csv_read(path, e))?
        .clone();
    reporter.report(&Event::HeaderRead {
        path,
        columns: headers.len(),
    });

    if !headers.iter().any(|name| name == options.column) {
        return Err(CliError::missing_column(&options.column, path));
    }

    let headers = Arc::new(headers);
    let mut matches = Vec::new();
    let mut values = StringRecord::new();

    while reader
        .read_record(&mut values)
        .map_err(|e| CliError::csv_read(path, e))?
    {
        let record = Record::new(Arc::clone(&headers), values.clone());
        if record.get(&options.column) == Some(options.target.as_str()) {
            reporter.report(&Event::MatchFound { path });
            matches.push(SearchMatch {
                file: path.to_path_buf(),
                record,
            });
        }
    }

    Ok(matches)
}
