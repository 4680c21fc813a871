//! Atomic CSV file writer with automatic cleanup on failure.
//!
//! Writes to a temporary file in the same directory as the destination,
//! then renames it over the destination on `finish()`. The destination is
//! untouched until that rename. If dropped before finishing, the temporary
//! file is deleted.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use tempfile::NamedTempFile;

use crate::error::{CliError, Result};

/// A CSV writer that replaces its destination in one rename.
pub struct AtomicCsvWriter {
    writer: Writer<BufWriter<NamedTempFile>>,
    final_path: PathBuf,
}

impl AtomicCsvWriter {
    /// Creates a new atomic CSV writer targeting `final_path`.
    ///
    /// The writer is flexible: rows may have differing field counts.
    ///
    /// # Errors
    ///
    /// Returns `CliError::DestinationNotWritable` if the temporary file cannot
    /// be created next to `final_path`.
    pub fn new(final_path: impl AsRef<Path>) -> Result<Self> {
        let final_path = final_path.as_ref().to_path_buf();

        let parent_dir = match final_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            Some(_) => PathBuf::from("."),
            None => {
                return Err(CliError::destination(
                    &final_path,
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "path has no parent directory",
                    ),
                ))
            },
        };

        let temp_file =
            NamedTempFile::new_in(&parent_dir).map_err(|e| CliError::destination(&final_path, e))?;

        let writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(BufWriter::new(temp_file));

        Ok(Self { writer, final_path })
    }

    /// Returns a mutable reference to the underlying CSV writer.
    pub fn writer_mut(&mut self) -> &mut Writer<BufWriter<NamedTempFile>> {
        &mut self.writer
    }

    /// Flushes all buffers and renames the temporary file over the destination.
    ///
    /// # Errors
    ///
    /// Returns `CliError::DestinationNotWritable` if flushing or the rename
    /// fails. The temporary file is removed in that case.
    pub fn finish(self) -> Result<PathBuf> {
        let final_path = self.final_path;

        let buf_writer = self
            .writer
            .into_inner()
            .map_err(|e| CliError::destination(&final_path, e.into_error()))?;

        let named_temp = buf_writer
            .into_inner()
            .map_err(|e| CliError::destination(&final_path, e.into_error()))?;

        named_temp
            .persist(&final_path)
            .map_err(|e| CliError::destination(&final_path, e.error))?;

        Ok(final_path)
    }
}
