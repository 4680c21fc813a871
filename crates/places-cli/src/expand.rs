//! House-number range expansion
//!
//! Rewrites an address CSV so that every `"<start> t/m <end>"` value in the
//! house-number column becomes one row per number. Rows produced along the
//! way pass through the same canonical-key filter as `dedup`, so overlapping
//! ranges do not yield repeats.

use crate::atomic_writer::AtomicCsvWriter;
use crate::error::{CliError, Result};
use crate::house_numbers::{parse_range, HouseNumbers};
use crate::report::{Event, Reporter};
use csv::{ReaderBuilder, StringRecord};
use places_common::canonical_key;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default column holding house numbers
pub const DEFAULT_HOUSE_NUMBER_COLUMN: &str = "house_numbers";

/// Expansion settings
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    /// Header name of the house-number column
    pub column: String,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            column: DEFAULT_HOUSE_NUMBER_COLUMN.to_string(),
        }
    }
}

/// Outcome of an expansion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandSummary {
    /// Data rows read, header excluded
    pub rows_read: u64,
    /// Data rows written, header excluded
    pub rows_written: u64,
    /// Values that were expanded as ranges
    pub ranges_expanded: u64,
    /// Emitted rows dropped as repeats
    pub duplicates_removed: u64,
}

/// Expand house-number ranges of `source` into `destination`
///
/// `destination` is replaced atomically and may be the same path as `source`.
pub fn expand_file(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExpandOptions,
    reporter: &dyn Reporter,
) -> Result<ExpandSummary> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    let file = File::open(source).map_err(|e| CliError::source_io(source, e))?;
    reporter.report(&Event::SourceOpened { path: source });

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| CliError::csv_read(source, e))?
        .clone();
    if headers.is_empty() {
        return Err(CliError::EmptySource(source.display().to_string()));
    }
    reporter.report(&Event::HeaderRead {
        path: source,
        columns: headers.len(),
    });

    let column = headers
        .iter()
        .position(|name| name == options.column)
        .ok_or_else(|| CliError::missing_column(&options.column, source))?;

    let mut writer = AtomicCsvWriter::new(destination)?;
    writer
        .writer_mut()
        .write_record(&headers)
        .map_err(|e| CliError::csv_write(destination, e))?;
    reporter.report(&Event::HeaderWritten { path: destination });

    let mut seen: HashSet<String> = HashSet::new();
    let mut summary = ExpandSummary::default();
    let mut record = StringRecord::new();

    while reader
        .read_record(&mut record)
        .map_err(|e| CliError::csv_read(source, e))?
    {
        summary.rows_read += 1;

        for row in expand_row(&record, column, &mut summary, reporter) {
            if !seen.insert(canonical_key(&row)) {
                summary.duplicates_removed += 1;
                let line = record.position().map(|pos| pos.line()).unwrap_or_default();
                reporter.report(&Event::DuplicateSkipped { line });
                continue;
            }
            writer
                .writer_mut()
                .write_record(&row)
                .map_err(|e| CliError::csv_write(destination, e))?;
            summary.rows_written += 1;
            reporter.report(&Event::RowWritten {
                path: destination,
                row: summary.rows_written,
            });
        }
    }

    drop(reader);
    writer.finish()?;
    reporter.report(&Event::FileReplaced {
        path: destination,
        rows: summary.rows_written,
    });

    Ok(summary)
}

/// Rows emitted for one input row
fn expand_row(
    record: &StringRecord,
    column: usize,
    summary: &mut ExpandSummary,
    reporter: &dyn Reporter,
) -> Vec<StringRecord> {
    let Some(value) = record.get(column) else {
        return vec![record.clone()];
    };

    match parse_range(value) {
        HouseNumbers::Single => vec![record.clone()],
        HouseNumbers::Unparsed => {
            reporter.report(&Event::RangeUnparsed { value });
            vec![record.clone()]
        },
        HouseNumbers::Range(range) => {
            summary.ranges_expanded += 1;
            let rows: Vec<StringRecord> = range
                .map(|number| {
                    let number = number.to_string();
                    record
                        .iter()
                        .enumerate()
                        .map(|(i, field)| if i == column { number.as_str() } else { field })
                        .collect()
                })
                .collect();
            reporter.report(&Event::RangeExpanded {
                value,
                count: rows.len(),
            });
            rows
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::report::testing::RecordingReporter;
    use crate::report::NullReporter;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "postal_code,street,house_numbers,city\n";

    fn source(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("adressen.csv");
        fs::write(&path, content).unwrap();
        path
    }

    fn numbers(path: &Path) -> Vec<String> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader
            .records()
            .map(|r| r.unwrap()[2].to_string())
            .collect()
    }

    #[test]
    fn test_expands_range() {
        let dir = TempDir::new().unwrap();
        let src = source(&dir, &format!("{HEADER}6369CW,Kerkstraat,2 t/m 4,Simpelveld\n"));
        let dest = dir.path().join("out.csv");

        let summary = expand_file(&src, &dest, &ExpandOptions::default(), &NullReporter).unwrap();

        assert_eq!(summary.rows_read, 1);
        assert_eq!(summary.rows_written, 3);
        assert_eq!(summary.ranges_expanded, 1);
        assert_eq!(numbers(&dest), vec!["2", "3", "4"]);
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            format!(
                "{HEADER}6369CW,Kerkstraat,2,Simpelveld\n6369CW,Kerkstraat,3,Simpelveld\n6369CW,Kerkstraat,4,Simpelveld\n"
            )
        );
    }

    #[test]
    fn test_keeps_plain_and_unparsable_values() {
        let dir = TempDir::new().unwrap();
        let src = source(
            &dir,
            &format!("{HEADER}1011AB,Damrak,12a,Amsterdam\n1011AB,Damrak,3 t/m x,Amsterdam\n"),
        );
        let dest = dir.path().join("out.csv");
        let reporter = RecordingReporter::default();

        let summary = expand_file(&src, &dest, &ExpandOptions::default(), &reporter).unwrap();

        assert_eq!(summary.ranges_expanded, 0);
        assert_eq!(numbers(&dest), vec!["12a", "3 t/m x"]);
        assert_eq!(reporter.count("range_unparsed"), 1);
    }

    #[test]
    fn test_overlapping_ranges_deduplicated() {
        let dir = TempDir::new().unwrap();
        let src = source(
            &dir,
            &format!("{HEADER}A,s,1 t/m 3,c\nA,s,2 t/m 4,c\nA,s,4,c\n"),
        );
        let dest = dir.path().join("out.csv");

        let summary = expand_file(&src, &dest, &ExpandOptions::default(), &NullReporter).unwrap();

        assert_eq!(numbers(&dest), vec!["1", "2", "3", "4"]);
        assert_eq!(summary.duplicates_removed, 3);
    }

    #[test]
    fn test_in_place() {
        let dir = TempDir::new().unwrap();
        let src = source(&dir, &format!("{HEADER}A,s,5 t/m 6,c\n"));

        expand_file(&src, &src, &ExpandOptions::default(), &NullReporter).unwrap();

        assert_eq!(numbers(&src), vec!["5", "6"]);
    }

    #[test]
    fn test_short_row_passes_through() {
        let dir = TempDir::new().unwrap();
        let src = source(&dir, &format!("{HEADER}A,s\n"));
        let dest = dir.path().join("out.csv");

        let summary = expand_file(&src, &dest, &ExpandOptions::default(), &NullReporter).unwrap();

        assert_eq!(summary.rows_written, 1);
    }

    #[test]
    fn test_missing_column() {
        let dir = TempDir::new().unwrap();
        let src = source(&dir, "postal_code,street\nA,s\n");

        let result = expand_file(&src, dir.path().join("out.csv"), &ExpandOptions::default(), &NullReporter);
        assert!(matches!(result, Err(CliError::MissingColumn { .. })));
    }

    #[test]
    fn test_empty_source() {
        let dir = TempDir::new().unwrap();
        let src = source(&dir, "");

        let result = expand_file(&src, dir.path().join("out.csv"), &ExpandOptions::default(), &NullReporter);
        assert!(matches!(result, Err(CliError::EmptySource(_))));
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_custom_column() {
        let dir = TempDir::new().unwrap();
        let src = source(&dir, "zip,nr\nA,8 t/m 9\n");
        let dest = dir.path().join("out.csv");
        let options = ExpandOptions {
            column: "nr".to_string(),
        };

        let summary = expand_file(&src, &dest, &options, &NullReporter).unwrap();
        assert_eq!(summary.rows_written, 2);
    }
}
