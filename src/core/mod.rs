//! Core transformation: header normalization, value coercion, table building

pub mod coerce;
pub mod headers;
pub mod table;

pub use coerce::coerce_value;
pub use headers::{duplicate_counts, normalize_headers, rename_duplicates, sanitize_for_markup};
pub use table::TableBuilder;
