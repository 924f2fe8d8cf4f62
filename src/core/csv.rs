//! Delimited-text parsing into a header plus string rows.
//!
//! Parsing is infallible: empty input yields an empty table and short rows
//! read as empty strings for their missing trailing columns. Column lookup
//! goes through an index built once per table.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::warn;

use crate::{PickError, Result};


/// A parsed CSV document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl CsvTable {
    /// Create an empty table with the given header, ready for `push_row`.
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        let index = build_index(&header);
        Self {
            header,
            rows: Vec::new(),
            index,
        }
    }

    /// Parse raw CSV text. Blank lines are skipped and the first remaining
    /// record is the header. Quoted cells may span lines.
    pub fn parse(text: &str) -> Self {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records().filter_map(|result| match result {
            Ok(record) if !is_blank(&record) => Some(record),
            Ok(_) => None,
            Err(err) => {
                warn!(%err, "skipping unreadable CSV record");
                None
            }
        });

        let Some(header_record) = records.next() else {
            return Self::default();
        };

        let header: Vec<String> = header_record
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let rows = records
            .map(|record| record.iter().map(str::to_string).collect())
            .collect();
        let index = build_index(&header);

        Self {
            header,
            rows,
            index,
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Named-field view of every row.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |cells| Record {
            table: self,
            cells,
        })
    }

    /// Append a row. Extra cells beyond the header are kept; missing
    /// trailing cells read as empty.
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Serialize back to CSV text, quoting cells that need it.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| PickError::Io(err.into_error()))?;
        String::from_utf8(bytes).map_err(|err| PickError::Io(std::io::Error::other(err)))
    }
}

/// One row with column-name access.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a CsvTable,
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// Cell value for `column`, or `""` when the column or cell is absent.
    pub fn get(&self, column: &str) -> &'a str {
        self.table
            .column_index(column)
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Trimmed cell value, `None` when blank or absent.
    pub fn get_non_empty(&self, column: &str) -> Option<&'a str> {
        let v = self.get(column).trim();
        (!v.is_empty()).then_some(v)
    }

    /// Cell parsed as a finite number, `None` when blank or not numeric.
    pub fn get_f64(&self, column: &str) -> Option<f64> {
        self.get_non_empty(column)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.table.has_column(column)
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }

    /// Cells aligned to the header, padded with empty strings.
    pub fn to_aligned(&self) -> Vec<String> {
        (0..self.table.header.len())
            .map(|i| self.cells.get(i).cloned().unwrap_or_default())
            .collect()
    }
}

fn build_index(header: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(header.len());
    for (i, name) in header.iter().enumerate() {
        // first occurrence wins on duplicate names
        index.entry(name.clone()).or_insert(i);
    }
    index
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}
