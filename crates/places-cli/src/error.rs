//! Error types for places CLI
//!
//! Every transform fails fast: errors surface immediately and terminate the
//! run. The variants separate missing inputs, malformed input and unwritable
//! destinations so callers and tests can tell them apart.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    SourceNotFound(String),

    /// Directory to scan does not exist or is not a directory
    #[error("Directory not found: '{0}'. Verify the directory path exists.")]
    DirectoryNotFound(String),

    /// Input could not be parsed as CSV
    #[error("Malformed row in '{path}'{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedRow {
        path: String,
        line: Option<u64>,
        message: String,
    },

    /// Header row lacks a required column
    #[error("Missing column '{column}' in '{path}'. Check the header row or pass --column.")]
    MissingColumn { column: String, path: String },

    /// Input has no header row
    #[error("Empty source: '{0}' has no header row.")]
    EmptySource(String),

    /// Output file or directory could not be created or replaced
    #[error("Destination not writable: '{path}': {source}. Check directory permissions and disk space.")]
    DestinationNotWritable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Command-line argument out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables.")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] io::Error),

    /// JSON serialization failed
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>, path: &Path) -> Self {
        Self::MissingColumn {
            column: column.into(),
            path: path.display().to_string(),
        }
    }

    /// Create a destination error for a path that could not be written
    pub fn destination(path: &Path, source: io::Error) -> Self {
        Self::DestinationNotWritable {
            path: path.display().to_string(),
            source,
        }
    }

    /// Classify an error raised while opening an input file
    pub fn source_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::SourceNotFound(path.display().to_string()),
            _ => Self::Io(err),
        }
    }

    /// Classify an error raised while reading CSV from `path`
    ///
    /// I/O failures stay I/O errors; everything else is a malformed row.
    pub fn csv_read(path: &Path, err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line());
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::source_io(path, e),
            _ => Self::MalformedRow {
                path: path.display().to_string(),
                line,
                message,
            },
        }
    }

    /// Classify an error raised while writing CSV to `path`
    pub fn csv_write(path: &Path, err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::destination(path, e),
            _ => Self::Other(anyhow::anyhow!(
                "Failed to write CSV to '{}': {}",
                path.display(),
                message
            )),
        }
    }
}
