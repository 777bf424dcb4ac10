//! Tabular record sources for the content pages.
//!
//! Content pages (themes, about) are fed from CSV resources: a header row
//! followed by data rows. Decoding turns the raw bytes into a [`RecordSet`],
//! an ordered list of [`Record`]s that all share the header's key set.
//!
//! ## Example
//!
//! ```ignore
//! use radar_print_source::RecordSet;
//!
//! let set = RecordSet::from_csv(b"title,description\nAI,Everywhere\n")?;
//! assert_eq!(set.records()[0].get("title"), Some("AI"));
//! ```

use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Resource is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("CSV decoding failed: {0}")]
    Csv(#[from] csv::Error),
}

/// One decoded row: column name to value, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used by fixtures.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// The ordered records of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSet {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    /// Decodes a CSV document with a header row.
    ///
    /// Short rows are padded with empty values so every record carries the
    /// full header key set; surplus cells beyond the header are ignored.
    /// Header names and values are kept verbatim (no trimming).
    pub fn from_csv(bytes: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(bytes)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let record: Record = headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), row.get(i).unwrap_or("").to_string()))
                .collect();
            records.push(record);
        }

        log::debug!(
            "Decoded {} records with columns {:?}",
            records.len(),
            headers
        );
        Ok(Self { headers, records })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
