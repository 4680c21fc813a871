//! Common types used across places

use csv::StringRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;

/// Delimiter used to rejoin fields into a canonical row key
pub const KEY_DELIMITER: char = ',';

/// Key under which values beyond the header width are serialized
pub const EXTRA_FIELDS_KEY: &str = "_extra";

/// Build the canonical text key of a row: its parsed fields rejoined with `,`.
///
/// Fields are not escaped, so `["a,b", "c"]` and `["a", "b,c"]` produce the
/// same key. Deduplication treats such rows as repeats.
pub fn canonical_key(row: &StringRecord) -> String {
    let mut key = String::with_capacity(row.as_slice().len() + row.len());
    for (i, field) in row.iter().enumerate() {
        if i > 0 {
            key.push(KEY_DELIMITER);
        }
        key.push_str(field);
    }
    key
}

/// A header-keyed view of one data row
///
/// The header is shared between all records of a file. Key order follows the
/// header; when a header name repeats, the key keeps its first position and
/// the last column with that name supplies the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    headers: Arc<StringRecord>,
    values: StringRecord,
}

impl Record {
    /// Create a record from a shared header and a row of values
    pub fn new(headers: Arc<StringRecord>, values: StringRecord) -> Self {
        Self { headers, values }
    }

    /// Get the value of a field by header name
    ///
    /// Returns `None` when the header has no such field or the row is too
    /// short to contain it.
    pub fn get(&self, field: &str) -> Option<&str> {
        let index = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, name)| *name == field)
            .map(|(i, _)| i)
            .last()?;
        self.values.get(index)
    }

    /// Header row this record is keyed by
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Raw row values, in file order
    pub fn values(&self) -> &StringRecord {
        &self.values
    }

    /// Iterate `(name, value)` pairs in header order
    ///
    /// A repeated header name appears once, at its first position, carrying
    /// the value of its last column.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        let headers: Vec<&str> = self.headers.iter().collect();
        let fields: Vec<(&str, &str)> = headers
            .iter()
            .enumerate()
            .filter(|&(i, name)| !headers[..i].contains(name))
            .filter_map(|(_, &name)| self.get(name).map(|value| (name, value)))
            .collect();
        fields.into_iter()
    }

    /// Values past the end of the header row
    pub fn extra(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().skip(self.headers.len())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra: Vec<&str> = self.extra().collect();
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        if !extra.is_empty() {
            map.serialize_entry(EXTRA_FIELDS_KEY, &extra)?;
        }
        map.end()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
