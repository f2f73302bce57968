// crates/gridbook-core/src/core/layout.rs
// ============================================================================
// Module: Sheet Layouts
// Description: Per-sheet structural descriptors and row arithmetic.
// Purpose: Keep all row-offset math in one place, derived per call.
// Dependencies: crate::core::{identifiers, selector}
// ============================================================================

//! ## Overview
//! A [`SheetLayout`] describes how one sheet is organized: how many metadata
//! rows precede the header, which column holds the record key, which columns
//! carry JSON-encoded cells, and how blank rows and empty fields are treated.
//! Absolute row numbers are always recomputed from the layout and a data row
//! index, never cached alongside fetched rows.

use crate::core::identifiers::SheetName;
use crate::core::selector::RangeSelector;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of header rows in every supported sheet.
pub const HEADER_ROWS: usize = 1;

/// Layout of the schedule sheet: header first, one column per time slot.
pub const SCHEDULE_LAYOUT: SheetLayout = SheetLayout {
    metadata_rows: 0,
    key_column: 0,
    json_fields: &[],
    skip_blank_keys: false,
    drop_empty_fields: false,
};

/// Layout of the orders sheet: one warning row above the header, keyed by
/// session identifier, with a JSON-encoded services column.
pub const ORDERS_LAYOUT: SheetLayout = SheetLayout {
    metadata_rows: 1,
    key_column: 0,
    json_fields: &["services"],
    skip_blank_keys: false,
    drop_empty_fields: false,
};

/// Layout of the services catalog sheet: keyed by service name, with a
/// JSON-encoded related-services column, skipping unnamed rows and dropping
/// blank fields from decoded records.
pub const SERVICES_LAYOUT: SheetLayout = SheetLayout {
    metadata_rows: 0,
    key_column: 0,
    json_fields: &["relatedServices"],
    skip_blank_keys: true,
    drop_empty_fields: true,
};

// ============================================================================
// SECTION: Layout Type
// ============================================================================

/// Structural description of one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// Rows above the header that carry no records.
    pub metadata_rows: usize,
    /// Zero-based column holding the record key.
    pub key_column: usize,
    /// Header names whose cells hold JSON-encoded values.
    pub json_fields: &'static [&'static str],
    /// Whether rows with a blank key cell are skipped during listing.
    pub skip_blank_keys: bool,
    /// Whether blank fields are dropped from decoded records.
    pub drop_empty_fields: bool,
}

impl SheetLayout {
    /// Returns the zero-based index of the header row in a fetched grid.
    #[must_use]
    pub const fn header_index(&self) -> usize {
        self.metadata_rows
    }

    /// Returns the zero-based index of the first data row in a fetched grid.
    #[must_use]
    pub const fn data_start_index(&self) -> usize {
        self.metadata_rows + HEADER_ROWS
    }

    /// Returns the 1-based sheet row holding the given data row.
    #[must_use]
    pub const fn sheet_row(&self, data_index: usize) -> usize {
        self.metadata_rows + HEADER_ROWS + data_index + 1
    }

    /// Builds the write-back selector for the given data row.
    #[must_use]
    pub fn write_selector(&self, sheet: &SheetName, data_index: usize) -> RangeSelector {
        RangeSelector::anchor(sheet.clone(), self.sheet_row(data_index))
    }

    /// Returns whether the named header column holds JSON-encoded cells.
    #[must_use]
    pub fn is_json_field(&self, name: &str) -> bool {
        self.json_fields.iter().any(|field| *field == name)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
