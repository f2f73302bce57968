// crates/gridbook-core/tests/mapper.rs
// ============================================================================
// Module: Row Mapper Tests
// Description: Validate header-driven decode and encode of sheet rows.
// Purpose: Ensure field order and JSON cell handling follow the header row.
// Dependencies: gridbook-core, serde_json
// ============================================================================

//! ## Overview
//! Behavior tests for the row codec: header order drives both directions,
//! missing cells decode as empty strings, and JSON columns round-trip
//! through the collapse-to-empty read policy.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use gridbook_core::ORDERS_LAYOUT;
use gridbook_core::Record;
use gridbook_core::RowMapper;
use gridbook_core::SCHEDULE_LAYOUT;
use serde_json::Value;
use serde_json::json;

/// Builds string rows from string slices.
fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| (*cell).to_string()).collect()
}

/// The orders header used by most tests.
fn orders_header() -> Vec<String> {
    row(&[
        "sessionId",
        "name",
        "phone",
        "services",
        "slot",
        "price",
        "status",
        "details",
        "createdAt",
    ])
}

/// Decoded fields appear in header order with header names.
#[test]
fn decode_follows_header_order() {
    let mapper = RowMapper::new(ORDERS_LAYOUT);
    let header = orders_header();
    let data = row(&[
        "s-1",
        "Ann",
        "555",
        r#"[{"name":"Cut","price":"10,50"}]"#,
        "Tue 10:00",
        "10.50",
        "pending",
        "",
        "2026-03-01T10:00:00Z",
    ]);
    let record = mapper.decode_row(&header, &data);
    let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "sessionId",
            "name",
            "phone",
            "services",
            "slot",
            "price",
            "status",
            "details",
            "createdAt"
        ]
    );
    assert_eq!(record.get("name"), Some(&json!("Ann")));
    assert_eq!(
        record.get("services"),
        Some(&json!([{"name": "Cut", "price": "10,50"}]))
    );
}

/// Cells missing from a short row decode as empty strings.
#[test]
fn decode_defaults_missing_cells() {
    let mapper = RowMapper::new(ORDERS_LAYOUT);
    let header = orders_header();
    let record = mapper.decode_row(&header, &row(&["s-2", "Bo"]));
    assert_eq!(record.get("phone"), Some(&json!("")));
    assert_eq!(record.get("createdAt"), Some(&json!("")));
    assert_eq!(record.get("services"), Some(&json!([])));
}

/// Malformed JSON cells decode as empty arrays, never as errors.
#[test]
fn decode_collapses_malformed_json() {
    let mapper = RowMapper::new(ORDERS_LAYOUT);
    let header = orders_header();
    let record = mapper.decode_row(&header, &row(&["s-3", "Cy", "555", "{broken"]));
    assert_eq!(record.get("services"), Some(&json!([])));
}

/// Encoding pulls cells from the record by header name, blank when absent.
#[test]
fn encode_follows_header_order() {
    let mapper = RowMapper::new(ORDERS_LAYOUT);
    let header = orders_header();
    let mut record = Record::new();
    record.set("name", json!("Dee"));
    record.set("sessionId", json!("s-4"));
    record.set("services", json!([{"name": "Wash", "price": "5"}]));
    let cells = mapper.encode_row(&header, &record);
    assert_eq!(cells.len(), header.len());
    assert_eq!(cells[0], "s-4");
    assert_eq!(cells[1], "Dee");
    assert_eq!(cells[3], r#"[{"name":"Wash","price":"5"}]"#);
    assert_eq!(cells[4], "");
}

/// A JSON column holding a raw string passes through unchanged.
#[test]
fn encode_keeps_raw_string_json_cells() {
    let mapper = RowMapper::new(ORDERS_LAYOUT);
    let header = orders_header();
    let mut record = Record::new();
    record.set("sessionId", json!("s-5"));
    record.set("services", json!(r#"[{"name":"Kept"}]"#));
    let cells = mapper.encode_row(&header, &record);
    assert_eq!(cells[3], r#"[{"name":"Kept"}]"#);
}

/// Reordering header columns changes decode and encode together.
#[test]
fn header_reorder_drives_both_directions() {
    let mapper = RowMapper::new(SCHEDULE_LAYOUT);
    let header = row(&["b", "a"]);
    let record = mapper.decode_row(&header, &row(&["2", "1"]));
    assert_eq!(record.get("a"), Some(&json!("1")));
    assert_eq!(record.get("b"), Some(&json!("2")));
    let cells = mapper.encode_row(&header, &record);
    assert_eq!(cells, row(&["2", "1"]));
}

/// Splitting skips metadata rows and tolerates empty data regions.
#[test]
fn split_honors_metadata_rows() {
    let mapper = RowMapper::new(ORDERS_LAYOUT);
    let grid = vec![row(&["do not edit"]), orders_header()];
    let regions = mapper.split(&grid).unwrap();
    assert_eq!(regions.header[0], "sessionId");
    assert!(regions.data.is_empty());

    let short = vec![row(&["do not edit"])];
    assert!(mapper.split(&short).is_none());
    assert!(mapper.split(&[]).is_none());
}

/// Non-string patch values encode as their compact JSON text.
#[test]
fn encode_renders_scalars_in_plain_columns() {
    let mapper = RowMapper::new(SCHEDULE_LAYOUT);
    let header = row(&["flag", "count"]);
    let mut record = Record::new();
    record.set("flag", Value::Bool(true));
    record.set("count", json!(3));
    assert_eq!(mapper.encode_row(&header, &record), row(&["true", "3"]));
}
