//! tabkit - spreadsheet, CSV and XML file utilities
//!
//! The library behind the `tabkit` binary. It turns tabular sources into a
//! [`Document`] of named records and writes it back out as an XML DataTable
//! or as CSV. It also re-indents XML files in bulk.
//!
//! # Features
//!
//! - Duplicate header renaming (`Name`, `Name_2`, ...) and XML-safe header names
//! - Short US date values rewritten as `YYYY-MM-DD HH:MM:SS`
//! - Excel (.xlsx) import
//! - In-place CSV cleanup with atomic file replacement
//! - Concurrent XML re-indenting
//!
//! # Example
//!
//! ```no_run
//! use tabkit::core::TableBuilder;
//! use tabkit::excel::SpreadsheetReader;
//! use tabkit::types::TableMode;
//! use tabkit::writer::data_table_to_string;
//!
//! let mut reader = SpreadsheetReader::open("orders.xlsx")?;
//! let rows = reader.rows(None)?;
//! let document = TableBuilder::new(TableMode::Spreadsheet).build_rows(rows)?;
//!
//! println!("{}", data_table_to_string(&document)?);
//! # Ok::<(), tabkit::error::TabError>(())
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod files;
pub mod formatter;
pub mod logging;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{TabError, TabResult};
pub use types::{Document, Field, HeaderMode, Record, TableMode};
