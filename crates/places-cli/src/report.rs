//! Progress reporting for the CSV transforms
//!
//! Transforms never print. They describe what they do through [`Event`]s
//! handed to an injected [`Reporter`], and the caller decides whether those
//! become log lines, a progress spinner, or nothing at all.

use crate::progress::create_row_counter;
use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Something a transform did
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// An input file was opened for reading
    SourceOpened { path: &'a Path },
    /// The header row of an input file was read
    HeaderRead { path: &'a Path, columns: usize },
    /// A row was dropped because its canonical key was already seen
    DuplicateSkipped { line: u64 },
    /// A temporary file was moved over its destination
    FileReplaced { path: &'a Path, rows: u64 },
    /// A house-number range was expanded into several rows
    RangeExpanded { value: &'a str, count: usize },
    /// A value looked like a house-number range but could not be parsed
    RangeUnparsed { value: &'a str },
    /// A directory scan started
    SearchStarted { dir: &'a Path, target: &'a str },
    /// A directory entry was examined
    FileChecked { path: &'a Path },
    /// A directory entry was ignored (not a CSV file)
    FileSkipped { path: &'a Path },
    /// A record matched the search target
    MatchFound { path: &'a Path },
    /// A directory scan finished
    SearchFinished { matches: usize },
    /// The output directory did not exist and was created
    OutputDirCreated { path: &'a Path },
    /// The output directory already existed
    OutputDirExists { path: &'a Path },
    /// A new partition was opened
    PartOpened { path: &'a Path, index: usize },
    /// The header was written to an output file
    HeaderWritten { path: &'a Path },
    /// A data row was written to an output file
    RowWritten { path: &'a Path, row: u64 },
    /// The current partition is full; the next row rotates
    PartLimitReached { path: &'a Path, rows: u64 },
    /// A partition was flushed and closed
    PartClosed { path: &'a Path, rows: u64 },
}

impl Event<'_> {
    /// Stable snake_case name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Event::SourceOpened { .. } => "source_opened",
            Event::HeaderRead { .. } => "header_read",
            Event::DuplicateSkipped { .. } => "duplicate_skipped",
            Event::FileReplaced { .. } => "file_replaced",
            Event::RangeExpanded { .. } => "range_expanded",
            Event::RangeUnparsed { .. } => "range_unparsed",
            Event::SearchStarted { .. } => "search_started",
            Event::FileChecked { .. } => "file_checked",
            Event::FileSkipped { .. } => "file_skipped",
            Event::MatchFound { .. } => "match_found",
            Event::SearchFinished { .. } => "search_finished",
            Event::OutputDirCreated { .. } => "output_dir_created",
            Event::OutputDirExists { .. } => "output_dir_exists",
            Event::PartOpened { .. } => "part_opened",
            Event::HeaderWritten { .. } => "header_written",
            Event::RowWritten { .. } => "row_written",
            Event::PartLimitReached { .. } => "part_limit_reached",
            Event::PartClosed { .. } => "part_closed",
        }
    }
}

/// Trait for transform reporting (dependency injection)
pub trait Reporter {
    /// Receive one event
    fn report(&self, event: &Event<'_>);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, event: &Event<'_>) {
        (**self).report(event)
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: &Event<'_>) {}
}

/// Turns events into structured `tracing` records
///
/// Per-row events are logged at `trace`, per-file events at `debug` or
/// `info`, and recoverable oddities at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &Event<'_>) {
        let name = event.name();
        match *event {
            Event::SourceOpened { path } => {
                info!(event = name, path = %path.display(), "Opened input file")
            },
            Event::HeaderRead { path, columns } => {
                debug!(event = name, path = %path.display(), columns, "Read header row")
            },
            Event::DuplicateSkipped { line } => {
                trace!(event = name, line, "Skipped duplicate row")
            },
            Event::FileReplaced { path, rows } => {
                info!(event = name, path = %path.display(), rows, "Replaced file")
            },
            Event::RangeExpanded { value, count } => {
                trace!(event = name, value, count, "Expanded house-number range")
            },
            Event::RangeUnparsed { value } => {
                warn!(event = name, value, "Kept unparsable house-number range as-is")
            },
            Event::SearchStarted { dir, target } => {
                info!(event = name, dir = %dir.display(), postal_code = target, "Searching directory")
            },
            Event::FileChecked { path } => {
                debug!(event = name, path = %path.display(), "Checking file")
            },
            Event::FileSkipped { path } => {
                debug!(event = name, path = %path.display(), "Skipping non-CSV entry")
            },
            Event::MatchFound { path } => {
                info!(event = name, path = %path.display(), "Match found")
            },
            Event::SearchFinished { matches } => {
                info!(event = name, matches, "Search finished")
            },
            Event::OutputDirCreated { path } => {
                info!(event = name, path = %path.display(), "Created output directory")
            },
            Event::OutputDirExists { path } => {
                debug!(event = name, path = %path.display(), "Output directory already exists")
            },
            Event::PartOpened { path, index } => {
                info!(event = name, path = %path.display(), index, "Opened partition")
            },
            Event::HeaderWritten { path } => {
                debug!(event = name, path = %path.display(), "Wrote header")
            },
            Event::RowWritten { path, row } => {
                trace!(event = name, path = %path.display(), row, "Wrote row")
            },
            Event::PartLimitReached { path, rows } => {
                debug!(event = name, path = %path.display(), rows, "Partition full")
            },
            Event::PartClosed { path, rows } => {
                info!(event = name, path = %path.display(), rows, "Closed partition")
            },
        }
    }
}

/// Drives a row-counting spinner and forwards everything to `tracing`
pub struct ProgressReporter {
    bar: ProgressBar,
    inner: TracingReporter,
}

impl ProgressReporter {
    /// Create a reporter with a fresh row counter
    pub fn new(message: &str) -> Self {
        Self {
            bar: create_row_counter(message),
            inner: TracingReporter,
        }
    }

    /// Rows counted so far
    pub fn rows(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Reporter for ProgressReporter {
    fn report(&self, event: &Event<'_>) {
        self.inner.report(event);
        match event {
            Event::RowWritten { .. } => self.bar.inc(1),
            Event::PartOpened { path, .. } => self.bar.set_message(format!(
                "Writing {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            )),
            _ => {},
        }
    }
}
