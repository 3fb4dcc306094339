//! Header normalization, value coercion and table building through the
//! public API

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use tabkit::core::{
    coerce_value, duplicate_counts, normalize_headers, rename_duplicates, sanitize_for_markup,
    TableBuilder,
};
use tabkit::{HeaderMode, TabError, TableMode};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// HEADER NORMALIZATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_rename_keeps_first_occurrence() {
    let renamed = rename_duplicates(strings(&["Name", "Age", "Name", "Name"]));
    assert_eq!(renamed, strings(&["Name", "Age", "Name_2", "Name_3"]));
}

#[test]
fn test_rename_without_duplicates_is_identity() {
    let headers = strings(&["a", "b", "c"]);
    assert_eq!(rename_duplicates(headers.clone()), headers);
}

#[test]
fn test_empty_headers_are_deduplicated_too() {
    let renamed = rename_duplicates(strings(&["", "x", ""]));
    assert_eq!(renamed, strings(&["", "x", "_2"]));
}

#[test]
fn test_generated_names_never_collide() {
    let renamed = rename_duplicates(strings(&["a", "a", "a_2", "a"]));
    let unique: HashSet<_> = renamed.iter().collect();
    assert_eq!(unique.len(), renamed.len());
    assert_eq!(renamed, strings(&["a", "a_3", "a_2", "a_4"]));
}

#[test]
fn test_duplicate_counts_in_first_seen_order() {
    let counts = duplicate_counts(&strings(&["b", "a", "b", "a", "a", "c"]));
    assert_eq!(counts, vec![("b".to_string(), 2), ("a".to_string(), 3)]);
}

#[test]
fn test_markup_sanitizing() {
    assert_eq!(sanitize_for_markup("first name"), "FirstName");
    assert_eq!(sanitize_for_markup("UNIT PRICE (USD)"), "UnitPriceUsd");
    assert_eq!(sanitize_for_markup("Price.Total"), "PriceTotal");
    assert_eq!(sanitize_for_markup("plain"), "plain");
}

#[test]
fn test_normalize_markup_resolves_new_collisions() {
    let headers = normalize_headers(strings(&["a b", "A.B"]), HeaderMode::Markup);
    assert_eq!(headers, strings(&["AB", "AB_2"]));
}

#[test]
fn test_normalize_plain_keeps_text() {
    let headers = normalize_headers(strings(&["first name", "first name"]), HeaderMode::Plain);
    assert_eq!(headers, strings(&["first name", "first name_2"]));
}

// ═══════════════════════════════════════════════════════════════════════════
// VALUE COERCION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_coercion_examples() {
    assert_eq!(coerce_value("01-02-06"), "2006-01-02 00:00:00");
    assert_eq!(coerce_value("1/2/06 15:04:05"), "2006-01-02 15:04:05");
    assert_eq!(coerce_value("1/2/06 3:04 PM"), "1/2/06 3:04 PM");
    assert_eq!(coerce_value("hello"), "hello");
    assert_eq!(coerce_value(""), "");
}

#[test]
fn test_coercion_is_idempotent() {
    for value in ["01-02-06", "12/31/99 23:59", "2006-01-02 00:00:00", "42"] {
        let once = coerce_value(value);
        assert_eq!(coerce_value(&once), once);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TABLE BUILDING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_spreadsheet_mode_cleans_headers_and_values() {
    let rows = vec![
        strings(&["order date", "order date", "Note"]),
        strings(&["01-02-06", "2/3/07", "01-02-06 is a date"]),
    ];
    let doc = TableBuilder::new(TableMode::Spreadsheet)
        .build_rows(rows)
        .unwrap();

    assert_eq!(doc.headers, strings(&["OrderDate", "OrderDate_2", "Note"]));
    let values: Vec<&str> = doc.records[0].values().collect();
    assert_eq!(
        values,
        vec!["2006-01-02 00:00:00", "2007-02-03 00:00:00", "01-02-06 is a date"]
    );
}

#[test]
fn test_csv_mode_passes_values_through() {
    let rows = vec![strings(&["d", "d"]), strings(&["01-02-06", "x"])];
    let doc = TableBuilder::new(TableMode::Csv).build_rows(rows).unwrap();

    assert_eq!(doc.headers, strings(&["d", "d_2"]));
    assert_eq!(doc.records[0].get("d"), Some("01-02-06"));
    assert_eq!(doc.records[0].get("d_2"), Some("x"));
}

#[test]
fn test_extra_columns_dropped_and_short_rows_rejected() {
    let builder = TableBuilder::new(TableMode::Csv);

    let doc = builder
        .build_rows(vec![strings(&["a", "b"]), strings(&["1", "2", "3"])])
        .unwrap();
    assert_eq!(doc.records[0].len(), 2);

    let err = builder
        .build_rows(vec![strings(&["a", "b"]), strings(&["1", "2"]), strings(&["3"])])
        .unwrap_err();
    assert!(matches!(
        err,
        TabError::RaggedRow {
            row: 3,
            expected: 2,
            found: 1
        }
    ));
}

#[test]
fn test_empty_source_gives_empty_document() {
    let doc = TableBuilder::new(TableMode::Spreadsheet)
        .build_rows(Vec::<Vec<String>>::new())
        .unwrap();
    assert!(doc.is_empty());
    assert!(doc.headers.is_empty());
}

#[test]
fn test_source_error_aborts_build() {
    let rows: Vec<Result<Vec<String>, TabError>> = vec![
        Ok(strings(&["a"])),
        Err(TabError::NoInput),
        Ok(strings(&["never"])),
    ];
    let err = TableBuilder::new(TableMode::Csv).build(rows).unwrap_err();
    assert!(matches!(err, TabError::NoInput));
}
