//! Row-oriented source → [`Document`]

use crate::core::coerce::coerce_value;
use crate::core::headers::normalize_headers;
use crate::error::{TabError, TabResult};
use crate::types::{Document, Record, TableMode};
use tracing::debug;

/// Builds a [`Document`] from a finite, forward-only sequence of rows.
///
/// The first row is the header row. Every following row becomes a record
/// whose values are paired with the normalized headers strictly by position.
/// Columns beyond the header width are dropped; a row with fewer columns than
/// the header is rejected with [`TabError::RaggedRow`].
#[derive(Debug, Clone, Copy)]
pub struct TableBuilder {
    mode: TableMode,
}

impl TableBuilder {
    pub fn new(mode: TableMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    /// Build from a fallible row source (e.g. CSV records). The first error
    /// from the source aborts the build.
    pub fn build<I>(&self, rows: I) -> TabResult<Document>
    where
        I: IntoIterator<Item = TabResult<Vec<String>>>,
    {
        let mut rows = rows.into_iter();

        let Some(header_row) = rows.next() else {
            return Ok(Document::default());
        };
        let headers = normalize_headers(header_row?, self.mode.header_mode());
        let mut document = Document::new(headers);

        for (index, row) in rows.enumerate() {
            // 1-based, counting the header row
            let line = index + 2;
            let record = self.build_record(&document.headers, row?, line)?;
            document.add_record(record);
        }

        debug!(
            columns = document.headers.len(),
            rows = document.row_count(),
            "Built document"
        );
        Ok(document)
    }

    /// Build from rows that cannot fail (e.g. an in-memory table)
    pub fn build_rows<I>(&self, rows: I) -> TabResult<Document>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        self.build(rows.into_iter().map(Ok))
    }

    fn build_record(&self, headers: &[String], row: Vec<String>, line: usize) -> TabResult<Record> {
        if row.len() < headers.len() {
            return Err(TabError::RaggedRow {
                row: line,
                expected: headers.len(),
                found: row.len(),
            });
        }
        if row.len() > headers.len() {
            debug!(
                row = line,
                dropped = row.len() - headers.len(),
                "Dropping columns beyond the header"
            );
        }

        let mut record = Record::new();
        for (name, value) in headers.iter().zip(row) {
            let value = if self.mode.coerces_values() {
                coerce_value(&value)
            } else {
                value
            };
            record.push(name.clone(), value);
        }
        Ok(record)
    }
}
