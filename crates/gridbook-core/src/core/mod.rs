// crates/gridbook-core/src/core/mod.rs
// ============================================================================
// Module: Core Data Model
// Description: Identifiers, layouts, selectors, records, and money helpers.
// Purpose: Define the spreadsheet-facing data model shared by all runtimes.
// Dependencies: crate::core::{identifiers, layout, money, record, selector}
// ============================================================================

//! ## Overview
//! The core module defines the data model for sheet-backed records: typed
//! identifiers, per-sheet layout descriptors, A1 range selectors, ordered
//! records, and decimal price arithmetic. Everything here is independent of
//! any concrete backend or transport.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identifiers;
pub mod layout;
pub mod money;
pub mod record;
pub mod selector;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::SessionId;
pub use identifiers::SheetName;
pub use identifiers::SpreadsheetId;
pub use layout::HEADER_ROWS;
pub use layout::ORDERS_LAYOUT;
pub use layout::SCHEDULE_LAYOUT;
pub use layout::SERVICES_LAYOUT;
pub use layout::SheetLayout;
pub use money::order_price;
pub use money::services_total;
pub use record::FoundRecord;
pub use record::Record;
pub use selector::RangeSelector;
