// crates/gridbook-core/src/interfaces/mod.rs
// ============================================================================
// Module: Core Interfaces
// Description: Store trait and error taxonomy for sheet backends.
// Purpose: Keep the record runtime independent of any concrete grid backend.
// Dependencies: async-trait, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The [`SheetStore`] trait is the only seam between the record runtime and a
//! concrete spreadsheet backend. It exposes three value operations: read a
//! range, overwrite a range, and append rows after the last populated row.
//! Backend failures surface as [`StoreError`]; a key lookup that finds
//! nothing is a normal outcome and never travels through this error type.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::identifiers::SheetName;
use crate::core::selector::RangeSelector;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors surfaced by sheet store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("sheet store backend error: {0}")]
    Backend(String),
    /// The addressed sheet or range does not exist.
    #[error("sheet store selector not found: {0}")]
    SelectorNotFound(String),
    /// The backend returned data the caller cannot use.
    #[error("sheet store invalid data: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Store Trait
// ============================================================================

/// Value-level operations over one spreadsheet document.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Reads every populated cell in the selected range as strings. Rows may
    /// be ragged; trailing blank cells are absent rather than empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend read fails.
    async fn list_values(&self, selector: &RangeSelector) -> Result<Vec<Vec<String>>, StoreError>;

    /// Overwrites the rectangle starting at the selector with the given rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend write fails.
    async fn write_range(
        &self,
        selector: &RangeSelector,
        rows: &[Vec<String>],
    ) -> Result<(), StoreError>;

    /// Appends rows after the last populated row of the sheet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend append fails.
    async fn append_rows(&self, sheet: &SheetName, rows: &[Vec<String>]) -> Result<(), StoreError>;
}
