//! Row deduplication
//!
//! Removes every row whose canonical key (fields rejoined with `,`) has
//! already been seen, keeping first occurrences in their original order.
//! The file is rewritten through [`AtomicCsvWriter`], so an interrupted run
//! leaves the original intact.
//!
//! Known normalisations:
//!
//! - Fields are not escaped when building the key: `"a,b",c` and `a,"b,c"`
//!   count as the same row.
//! - Blank lines are skipped by the reader and never written back.
//! - Rows are rewritten with `\n` terminators, so CRLF input becomes LF.

use crate::atomic_writer::AtomicCsvWriter;
use crate::error::{CliError, Result};
use crate::report::{Event, Reporter};
use csv::{ReaderBuilder, StringRecord};
use places_common::canonical_key;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Outcome of a deduplication run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupSummary {
    /// Rows read from the file, header included
    pub rows_read: u64,
    /// Rows kept
    pub rows_written: u64,
    /// Rows dropped as repeats
    pub duplicates_removed: u64,
}

/// Deduplicate the rows of `path` in place
///
/// Every row is treated alike; a header row is simply the first row. Rows may
/// have differing field counts.
pub fn dedup_file(path: impl AsRef<Path>, reporter: &dyn Reporter) -> Result<DedupSummary> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| CliError::source_io(path, e))?;
    reporter.report(&Event::SourceOpened { path });

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut writer = AtomicCsvWriter::new(path)?;
    let mut seen: HashSet<String> = HashSet::new();
    let mut summary = DedupSummary::default();
    let mut record = StringRecord::new();

    while reader
        .read_record(&mut record)
        .map_err(|e| CliError::csv_read(path, e))?
    {
        summary.rows_read += 1;

        if seen.insert(canonical_key(&record)) {
            writer
                .writer_mut()
                .write_record(&record)
                .map_err(|e| CliError::csv_write(path, e))?;
            summary.rows_written += 1;
            reporter.report(&Event::RowWritten {
                path,
                row: summary.rows_written,
            });
        } else {
            summary.duplicates_removed += 1;
            let line = record
                .position()
                .map(|pos| pos.line())
                .unwrap_or(summary.rows_read);
            reporter.report(&Event::DuplicateSkipped { line });
        }
    }

    drop(reader);
    writer.finish()?;
    reporter.report(&Event::FileReplaced {
        path,
        rows: summary.rows_written,
    });

    Ok(summary)
}
