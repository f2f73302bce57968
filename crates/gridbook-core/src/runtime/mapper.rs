// crates/gridbook-core/src/runtime/mapper.rs
// ============================================================================
// Module: Row Mapper
// Description: Header-driven codecs between value rows and records.
// Purpose: Make the header row the single source of field order and names.
// Dependencies: serde_json, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The mapper converts between raw string rows and [`Record`]s using the
//! sheet's header row as the schema. Field names and field order come from
//! the header alone, for decoding and encoding alike, so a column reordered
//! in the sheet changes both directions at once. Cells named by the layout's
//! JSON field list are decoded strictly and collapsed to an empty array when
//! the cell does not hold valid JSON.

use serde_json::Value;
use thiserror::Error;

use crate::core::layout::SheetLayout;
use crate::core::record::Record;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised when a JSON cell fails strict decoding.
#[derive(Debug, Error)]
#[error("json cell decode failed: {reason}")]
pub struct CellDecodeError {
    /// Parser failure description.
    reason: String,
}

// ============================================================================
// SECTION: Cell Codecs
// ============================================================================

/// Strictly decodes a JSON-encoded cell. Blank cells and cells holding
/// anything other than valid JSON are errors at this layer.
///
/// # Errors
///
/// Returns [`CellDecodeError`] when the cell is not valid JSON.
pub fn decode_json_cell(cell: &str) -> Result<Value, CellDecodeError> {
    serde_json::from_str(cell).map_err(|error| CellDecodeError {
        reason: error.to_string(),
    })
}

/// Decodes a JSON-encoded cell, collapsing every failure to an empty array.
/// This is the read policy for JSON columns: a blank or corrupted cell never
/// fails a listing, it simply yields no entries.
#[must_use]
pub fn json_cell_or_empty(cell: &str) -> Value {
    decode_json_cell(cell).unwrap_or_else(|_| Value::Array(Vec::new()))
}

// ============================================================================
// SECTION: Grid Regions
// ============================================================================

/// Borrowed view of a fetched grid split into header and data rows.
#[derive(Debug, Clone, Copy)]
pub struct SheetRegions<'a> {
    /// The header row naming every column.
    pub header: &'a [String],
    /// Data rows below the header, possibly empty.
    pub data: &'a [Vec<String>],
}

// ============================================================================
// SECTION: Row Mapper
// ============================================================================

/// Header-driven codec for one sheet layout.
#[derive(Debug, Clone, Copy)]
pub struct RowMapper {
    /// Layout describing metadata rows and JSON columns.
    layout: SheetLayout,
}

impl RowMapper {
    /// Creates a mapper for the given layout.
    #[must_use]
    pub const fn new(layout: SheetLayout) -> Self {
        Self { layout }
    }

    /// Splits a fetched grid into header and data regions. Returns `None`
    /// when the grid is too short to contain a header row.
    #[must_use]
    pub fn split<'a>(&self, rows: &'a [Vec<String>]) -> Option<SheetRegions<'a>> {
        let header = rows.get(self.layout.header_index())?;
        let data = rows.get(self.layout.data_start_index()..).unwrap_or(&[]);
        Some(SheetRegions {
            header: header.as_slice(),
            data,
        })
    }

    /// Decodes one data row into a record keyed by header names. Missing
    /// cells decode as empty strings; JSON columns decode through the
    /// collapse-to-empty policy.
    #[must_use]
    pub fn decode_row(&self, header: &[String], row: &[String]) -> Record {
        let mut record = Record::new();
        for (index, name) in header.iter().enumerate() {
            let cell = row.get(index).map_or("", String::as_str);
            let value = if self.layout.is_json_field(name) {
                json_cell_or_empty(cell)
            } else {
                Value::String(cell.to_string())
            };
            record.set(name.clone(), value);
        }
        record
    }

    /// Encodes a record into one cell per header column. Fields absent from
    /// the record encode as empty cells; JSON columns are serialized unless
    /// the value is already a raw string.
    #[must_use]
    pub fn encode_row(&self, header: &[String], record: &Record) -> Vec<String> {
        header
            .iter()
            .map(|name| {
                let value = record.get(name);
                if self.layout.is_json_field(name) {
                    encode_json_cell(value)
                } else {
                    encode_plain_cell(value)
                }
            })
            .collect()
    }
}

/// Encodes a JSON-column value. Raw strings pass through untouched so a
/// previously encoded cell is never double-wrapped.
fn encode_json_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(raw)) => raw.clone(),
        Some(other) => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Encodes a plain-column value. Strings pass through; other values render
/// as compact JSON.
fn encode_plain_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(raw)) => raw.clone(),
        Some(other) => other.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use serde_json::json;

    use super::decode_json_cell;
    use super::json_cell_or_empty;

    /// Valid JSON cells decode to their parsed value.
    #[test]
    fn strict_decode_accepts_valid_json() {
        let value = decode_json_cell(r#"[{"name":"Cut"}]"#).unwrap();
        assert_eq!(value, json!([{"name": "Cut"}]));
    }

    /// Blank and malformed cells are errors at the strict layer.
    #[test]
    fn strict_decode_rejects_blank_and_malformed() {
        assert!(decode_json_cell("").is_err());
        assert!(decode_json_cell("not json").is_err());
        assert!(decode_json_cell("[{\"name\":").is_err());
    }

    /// The read policy collapses every strict failure to an empty array.
    #[test]
    fn policy_collapses_failures_to_empty_array() {
        assert_eq!(json_cell_or_empty(""), json!([]));
        assert_eq!(json_cell_or_empty("not json"), json!([]));
        assert_eq!(json_cell_or_empty(r#"["kept"]"#), json!(["kept"]));
    }
}
