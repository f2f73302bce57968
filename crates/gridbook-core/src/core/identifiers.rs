// crates/gridbook-core/src/core/identifiers.rs
// ============================================================================
// Module: Core Identifiers
// Description: Typed identifiers for sheets, spreadsheets, and sessions.
// Purpose: Prevent identifier mixups across store and repository boundaries.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifier newtypes used throughout the crate. Each wraps a `String` with
//! transparent serialization so wire payloads and range selectors stay plain
//! strings while call sites get type-checked distinctions.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Name of a single sheet tab inside a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetName(String);

impl SheetName {
    /// Creates a new sheet name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the sheet name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SheetName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SheetName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Identifier of a remote spreadsheet document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    /// Creates a new spreadsheet identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SpreadsheetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SpreadsheetId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Client-issued identifier keying one order row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new session identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
