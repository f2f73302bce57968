// crates/gridbook-core/src/runtime/mod.rs
// ============================================================================
// Module: Record Runtime
// Description: Row mapping, keyed repositories, and in-memory stores.
// Purpose: Provide the executable record semantics over any sheet store.
// Dependencies: crate::runtime::{mapper, repository, store}
// ============================================================================

//! ## Overview
//! The runtime turns raw value grids into records and back. The mapper owns
//! header-driven row codecs, the repository owns keyed access semantics, and
//! the in-memory store backs tests and local runs without a remote backend.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod mapper;
pub mod repository;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use mapper::CellDecodeError;
pub use mapper::RowMapper;
pub use mapper::SheetRegions;
pub use repository::SheetRepository;
pub use repository::SheetSnapshot;
pub use store::InMemorySheetStore;
pub use store::SharedSheetStore;
