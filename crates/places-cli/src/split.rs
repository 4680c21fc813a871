//! Record-aware CSV splitting
//!
//! Re-emits the data rows of one CSV file into numbered partitions of at most
//! `max_rows` rows each, every partition starting with a copy of the header.
//! Rows are copied as raw bytes, so quoted fields with embedded commas or
//! newlines survive unchanged.
//!
//! Rotation is driven by a row counter: when it is zero at the start of a row
//! the open partition is closed and the next one opened; when it reaches
//! `max_rows` it is reset. A file is therefore only opened once a row
//! actually needs it, and `k * max_rows` rows yield exactly `k` partitions.
//!
//! Existing partitions in the output directory are overwritten. Blank lines
//! in the source are skipped, and partitions are written with `\n`
//! terminators whatever the source used.

use crate::error::{CliError, Result};
use crate::report::{Event, Reporter};
use csv::{ByteRecord, ReaderBuilder, Writer, WriterBuilder};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Default maximum number of data rows per partition
pub const DEFAULT_MAX_ROWS: u64 = 250_000;

/// Default file-name prefix of partitions
pub const DEFAULT_PART_PREFIX: &str = "part_";

/// Splitting configuration
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Maximum data rows per partition, header excluded
    pub max_rows: u64,
    /// Partition file-name prefix; files are `<prefix><n>.csv`
    pub prefix: String,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            prefix: DEFAULT_PART_PREFIX.to_string(),
        }
    }
}

impl SplitOptions {
    /// Sets the max_rows limit.
    pub fn max_rows(mut self, rows: u64) -> Self {
        self.max_rows = rows;
        self
    }

    /// Sets the partition prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// One written partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartInfo {
    pub path: PathBuf,
    /// Data rows in the partition, header excluded
    pub rows: u64,
}

/// Result of splitting a CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// Partitions in emission order
    pub parts: Vec<PartInfo>,
    /// Total data rows copied
    pub total_rows: u64,
}

/// Path of partition `index` (1-based)
pub fn part_path(output_dir: &Path, prefix: &str, index: usize) -> PathBuf {
    output_dir.join(format!("{prefix}{index}.csv"))
}

/// Split `source` into partitions inside `output_dir`
///
/// # Errors
///
/// - `InvalidArgument` if `max_rows` is zero
/// - `SourceNotFound` / `EmptySource` if the source is missing or has no header
/// - `DestinationNotWritable` if the output directory or a partition cannot be created
/// - `MalformedRow` if the source cannot be parsed
pub fn split_file(
    source: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &SplitOptions,
    reporter: &dyn Reporter,
) -> Result<SplitSummary> {
    let source = source.as_ref();
    let output_dir = output_dir.as_ref();

    if options.max_rows == 0 {
        return Err(CliError::invalid_argument("max rows per file must be at least 1"));
    }

    let file = File::open(source).map_err(|e| CliError::source_io(source, e))?;
    reporter.report(&Event::SourceOpened { path: source });

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader
        .byte_headers()
        .map_err(|e| CliError::csv_read(source, e))?
        .clone();
    if headers.is_empty() {
        return Err(CliError::EmptySource(source.display().to_string()));
    }
    reporter.report(&Event::HeaderRead {
        path: source,
        columns: headers.len(),
    });

    prepare_output_dir(output_dir, reporter)?;

    let mut summary = SplitSummary::default();
    let mut current: Option<Partition> = None;
    let mut current_rows: u64 = 0;
    let mut record = ByteRecord::new();

    while reader
        .read_byte_record(&mut record)
        .map_err(|e| CliError::csv_read(source, e))?
    {
        let part = match current.take() {
            Some(part) if current_rows > 0 => current.insert(part),
            previous => {
                if let Some(part) = previous {
                    summary.parts.push(part.close(reporter)?);
                }
                let index = summary.parts.len() + 1;
                let path = part_path(output_dir, &options.prefix, index);
                current.insert(Partition::open(path, index, &headers, reporter)?)
            },
        };

        part.write(&record, reporter)?;
        current_rows += 1;

        if current_rows >= options.max_rows {
            reporter.report(&Event::PartLimitReached {
                path: &part.path,
                rows: current_rows,
            });
            current_rows = 0;
        }
    }

    if let Some(part) = current.take() {
        summary.parts.push(part.close(reporter)?);
    }

    summary.total_rows = summary.parts.iter().map(|p| p.rows).sum();
    Ok(summary)
}

/// Create the output directory if it does not exist yet
fn prepare_output_dir(dir: &Path, reporter: &dyn Reporter) -> Result<()> {
    if dir.is_dir() {
        reporter.report(&Event::OutputDirExists { path: dir });
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|e| CliError::destination(dir, e))?;
    reporter.report(&Event::OutputDirCreated { path: dir });
    Ok(())
}

/// The partition currently being written
struct Partition {
    path: PathBuf,
    writer: Writer<BufWriter<File>>,
    rows: u64,
}

impl Partition {
    fn open(
        path: PathBuf,
        index: usize,
        headers: &ByteRecord,
        reporter: &dyn Reporter,
    ) -> Result<Self> {
        let file = File::create(&path).map_err(|e| CliError::destination(&path, e))?;
        reporter.report(&Event::PartOpened { path: &path, index });

        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(BufWriter::new(file));
        writer
            .write_byte_record(headers)
            .map_err(|e| CliError::csv_write(&path, e))?;
        reporter.report(&Event::HeaderWritten { path: &path });

        Ok(Self {
            path,
            writer,
            rows: 0,
        })
    }

    fn write(&mut self, record: &ByteRecord, reporter: &dyn Reporter) -> Result<()> {
        self.writer
            .write_byte_record(record)
            .map_err(|e| CliError::csv_write(&self.path, e))?;
        self.rows += 1;
        reporter.report(&Event::RowWritten {
            path: &self.path,
            row: self.rows,
        });
        Ok(())
    }

    fn close(mut self, reporter: &dyn Reporter) -> Result<PartInfo> {
        self.writer
            .flush()
            .map_err(|e| CliError::destination(&self.path, e))?;
        reporter.report(&Event::PartClosed {
            path: &self.path,
            rows: self.rows,
        });
        Ok(PartInfo {
            path: self.path,
            rows: self.rows,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::report::testing::RecordingReporter;
    use crate::report::NullReporter;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn create_source(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("adressen.csv");
        fs::write(&path, content).unwrap();
        path
    }

    /// Parse a partition into header + records
    fn parse_part(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = ReaderBuilder::new().flexible(true).from_path(path).unwrap();
        let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
        let records = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (headers, records)
    }

    fn source_with_rows(rows: usize) -> String {
        let mut content = String::from("id,name\n");
        for i in 1..=rows {
            content.push_str(&format!("{i},name{i}\n"));
        }
        content
    }

    #[test]
    fn test_five_rows_by_two() {
        let src_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let source = create_source(&src_dir, &source_with_rows(5));

        let summary = split_file(
            &source,
            out_dir.path(),
            &SplitOptions::default().max_rows(2),
            &NullReporter,
        )
        .unwrap();

        assert_eq!(summary.total_rows, 5);
        let names: Vec<_> = summary
            .parts
            .iter()
            .map(|p| p.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["part_1.csv", "part_2.csv", "part_3.csv"]);
        assert_eq!(
            summary.parts.iter().map(|p| p.rows).collect::<Vec<_>>(),
            vec![2, 2, 1]
        );

        assert_eq!(
            fs::read_to_string(out_dir.path().join("part_1.csv")).unwrap(),
            "id,name\n1,name1\n2,name2\n"
        );
        assert_eq!(
            fs::read_to_string(out_dir.path().join("part_3.csv")).unwrap(),
            "id,name\n5,name5\n"
        );
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_file() {
        let src_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let source = create_source(&src_dir, &source_with_rows(6));

        let summary = split_file(
            &source,
            out_dir.path(),
            &SplitOptions::default().max_rows(3),
            &NullReporter,
        )
        .unwrap();

        assert_eq!(summary.parts.len(), 2);
        assert!(!out_dir.path().join("part_3.csv").exists());
    }

    #[test]
    fn test_header_only_source_writes_nothing() {
        let src_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let source = create_source(&src_dir, "id,name\n");

        let summary =
            split_file(&source, out_dir.path(), &SplitOptions::default(), &NullReporter).unwrap();

        assert!(summary.parts.is_empty());
        assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_source_fails() {
        let src_dir = TempDir::new().unwrap();
        let source = create_source(&src_dir, "");

        let result = split_file(
            &source,
            src_dir.path().join("out"),
            &SplitOptions::default(),
            &NullReporter,
        );
        assert!(matches!(result, Err(CliError::EmptySource(_))));
    }

    #[test]
    fn test_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let result = split_file(
            dir.path().join("absent.csv"),
            dir.path().join("out"),
            &SplitOptions::default(),
            &NullReporter,
        );
        assert!(matches!(result, Err(CliError::SourceNotFound(_))));
    }

    #[test]
    fn test_zero_max_rows_rejected() {
        let dir = TempDir::new().unwrap();
        let source = create_source(&dir, &source_with_rows(1));
        let result = split_file(
            &source,
            dir.path(),
            &SplitOptions::default().max_rows(0),
            &NullReporter,
        );
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let source = create_source(&dir, &source_with_rows(1));
        let out = dir.path().join("data_split/nested");
        let reporter = RecordingReporter::default();

        split_file(&source, &out, &SplitOptions::default(), &reporter).unwrap();

        assert!(out.join("part_1.csv").exists());
        assert_eq!(reporter.count("output_dir_created"), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_output_dir_blocked_by_file() {
        let dir = TempDir::new().unwrap();
        let source = create_source(&dir, &source_with_rows(1));
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = split_file(
            &source,
            blocker.join("out"),
            &SplitOptions::default(),
            &NullReporter,
        );
        assert!(matches!(result, Err(CliError::DestinationNotWritable { .. })));
    }

    #[test]
    fn test_overwrites_existing_partitions() {
        let src_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        fs::write(out_dir.path().join("part_1.csv"), "stale\n").unwrap();
        let source = create_source(&src_dir, &source_with_rows(1));

        split_file(&source, out_dir.path(), &SplitOptions::default(), &NullReporter).unwrap();

        assert_eq!(
            fs::read_to_string(out_dir.path().join("part_1.csv")).unwrap(),
            "id,name\n1,name1\n"
        );
    }

    #[test]
    fn test_quoted_fields_preserved() {
        let src_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let source = create_source(
            &src_dir,
            "street,note\n\"Kerk, straat\",\"Line1\nLine2\"\nDamrak,x\n",
        );

        let summary = split_file(
            &source,
            out_dir.path(),
            &SplitOptions::default().max_rows(1),
            &NullReporter,
        )
        .unwrap();

        let (headers, records) = parse_part(&summary.parts[0].path);
        assert_eq!(headers, vec!["street", "note"]);
        assert_eq!(records, vec![vec!["Kerk, straat", "Line1\nLine2"]]);
    }

    #[test]
    fn test_blank_lines_and_crlf_are_normalised() {
        let src_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let source = create_source(&src_dir, "id,name\r\n\r\n1,a\r\n\r\n2,b\r\n");

        let summary =
            split_file(&source, out_dir.path(), &SplitOptions::default(), &NullReporter).unwrap();

        assert_eq!(summary.total_rows, 2);
        assert_eq!(
            fs::read_to_string(out_dir.path().join("part_1.csv")).unwrap(),
            "id,name\n1,a\n2,b\n"
        );
    }

    #[test]
    fn test_custom_prefix() {
        let src_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let source = create_source(&src_dir, &source_with_rows(3));

        split_file(
            &source,
            out_dir.path(),
            &SplitOptions::default().max_rows(2).prefix("data_nl_"),
            &NullReporter,
        )
        .unwrap();

        assert!(out_dir.path().join("data_nl_1.csv").exists());
        assert!(out_dir.path().join("data_nl_2.csv").exists());
    }

    #[test]
    fn test_reports_rotation() {
        let src_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let source = create_source(&src_dir, &source_with_rows(3));
        let reporter = RecordingReporter::default();

        split_file(
            &source,
            out_dir.path(),
            &SplitOptions::default().max_rows(2),
            &reporter,
        )
        .unwrap();

        assert_eq!(reporter.count("output_dir_exists"), 1);
        assert_eq!(reporter.count("part_opened"), 2);
        assert_eq!(reporter.count("header_written"), 2);
        assert_eq!(reporter.count("row_written"), 3);
        assert_eq!(reporter.count("part_limit_reached"), 1);
        assert_eq!(reporter.count("part_closed"), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_partitions_reassemble_source(rows in 0usize..40, max_rows in 1u64..8) {
            let src_dir = TempDir::new().unwrap();
            let out_dir = TempDir::new().unwrap();
            let source = create_source(&src_dir, &source_with_rows(rows));

            let summary = split_file(
                &source,
                out_dir.path(),
                &SplitOptions::default().max_rows(max_rows),
                &NullReporter,
            )
            .unwrap();

            let expected_parts = (rows as u64).div_ceil(max_rows);
            prop_assert_eq!(summary.parts.len() as u64, expected_parts);
            prop_assert_eq!(summary.total_rows, rows as u64);

            let mut reassembled = Vec::new();
            for (i, part) in summary.parts.iter().enumerate() {
                prop_assert_eq!(&part.path, &part_path(out_dir.path(), "part_", i + 1));
                let (headers, records) = parse_part(&part.path);
                prop_assert_eq!(headers, vec!["id".to_string(), "name".to_string()]);
                prop_assert!(records.len() as u64 <= max_rows);
                prop_assert_eq!(records.len() as u64, part.rows);
                reassembled.extend(records);
            }

            let expected: Vec<Vec<String>> = (1..=rows)
                .map(|i| vec![i.to_string(), format!("name{i}")])
                .collect();
            prop_assert_eq!(reassembled, expected);

            if rows as u64 % max_rows != 0 {
                prop_assert_eq!(summary.parts.last().unwrap().rows, rows as u64 % max_rows);
            }
        }
    }
}
