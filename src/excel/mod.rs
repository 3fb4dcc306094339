//! Excel import module
//!
//! Opens .xlsx workbooks, lists their sheets, and yields a sheet's rows as
//! plain string cells for the table builder.

mod importer;

pub use importer::{cell_to_string, SheetRows, SpreadsheetReader};
