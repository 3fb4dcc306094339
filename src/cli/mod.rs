//! CLI command handlers

pub mod commands;

pub use commands::{csv_rename_dupes, csv_trim, sheets, xlsx_to_xml, xml_format};
