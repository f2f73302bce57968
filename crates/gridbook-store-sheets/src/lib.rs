// crates/gridbook-store-sheets/src/lib.rs
// ============================================================================
// Module: Gridbook Sheets Store Library
// Description: Remote values-API implementation of the sheet store.
// Purpose: Expose the HTTP-backed store behind the core store interface.
// Dependencies: gridbook-core, reqwest
// ============================================================================

//! ## Overview
//! `gridbook-store-sheets` implements the core [`SheetStore`] interface over
//! a remote spreadsheet values API. It owns URL construction, bearer
//! authentication, timeout configuration, and the mapping from HTTP status
//! codes to store errors.
//!
//! [`SheetStore`]: gridbook_core::SheetStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::SheetsApiStore;
pub use client::SheetsApiStoreParams;
