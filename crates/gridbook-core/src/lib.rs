// crates/gridbook-core/src/lib.rs
// ============================================================================
// Module: Gridbook Core Library
// Description: Public API surface for the Gridbook core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Gridbook core maps spreadsheet row grids to keyed JSON records and back.
//! It is backend-agnostic and integrates with concrete grid backends through
//! explicit interfaces rather than embedding any wire client.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::FoundRecord;
pub use crate::core::HEADER_ROWS;
pub use crate::core::ORDERS_LAYOUT;
pub use crate::core::Record;
pub use crate::core::RangeSelector;
pub use crate::core::SCHEDULE_LAYOUT;
pub use crate::core::SERVICES_LAYOUT;
pub use crate::core::SessionId;
pub use crate::core::SheetLayout;
pub use crate::core::SheetName;
pub use crate::core::SpreadsheetId;
pub use crate::core::order_price;
pub use crate::core::services_total;

pub use interfaces::SheetStore;
pub use interfaces::StoreError;
pub use runtime::InMemorySheetStore;
pub use runtime::RowMapper;
pub use runtime::SharedSheetStore;
pub use runtime::SheetRegions;
pub use runtime::SheetRepository;
pub use runtime::SheetSnapshot;
