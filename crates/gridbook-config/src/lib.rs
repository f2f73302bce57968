// crates/gridbook-config/src/lib.rs
// ============================================================================
// Module: Gridbook Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for gridbook.toml semantics.
// Dependencies: gridbook-core, serde, toml
// ============================================================================

//! ## Overview
//! `gridbook-config` defines the canonical configuration model for the
//! booking service. It provides strict, fail-closed validation: a config
//! that loads is a config the server can run with, including a reachable
//! bind address, a non-empty access token, and complete backend settings.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
