// crates/gridbook-core/src/core/selector.rs
// ============================================================================
// Module: Range Selectors
// Description: A1-notation range addressing for reads and writes.
// Purpose: Build backend range references without string plumbing at call sites.
// Dependencies: crate::core::identifiers
// ============================================================================

//! ## Overview
//! A [`RangeSelector`] names the region of a sheet that a store operation
//! targets. A bare sheet selector covers every populated cell of the tab; an
//! anchored selector starts at column A of one 1-based row and is used for
//! single-row write-backs.

use std::fmt;

use crate::core::identifiers::SheetName;

// ============================================================================
// SECTION: Selector Type
// ============================================================================

/// Addressable region of a sheet in A1 notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeSelector {
    /// Every populated cell of the named sheet.
    Sheet(SheetName),
    /// The region starting at column A of the given 1-based row.
    Anchor {
        /// Sheet the anchored region belongs to.
        sheet: SheetName,
        /// 1-based row number of the anchor cell.
        row: usize,
    },
}

impl RangeSelector {
    /// Creates a selector covering a whole sheet.
    #[must_use]
    pub const fn sheet(name: SheetName) -> Self {
        Self::Sheet(name)
    }

    /// Creates a selector anchored at column A of a 1-based row.
    #[must_use]
    pub const fn anchor(sheet: SheetName, row: usize) -> Self {
        Self::Anchor { sheet, row }
    }

    /// Returns the sheet the selector addresses.
    #[must_use]
    pub const fn sheet_name(&self) -> &SheetName {
        match self {
            Self::Sheet(name) => name,
            Self::Anchor { sheet, .. } => sheet,
        }
    }

    /// Renders the selector in A1 notation.
    #[must_use]
    pub fn as_a1(&self) -> String {
        match self {
            Self::Sheet(name) => name.as_str().to_string(),
            Self::Anchor { sheet, row } => format!("{sheet}!A{row}"),
        }
    }
}

impl fmt::Display for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sheet(name) => name.fmt(f),
            Self::Anchor { sheet, row } => write!(f, "{sheet}!A{row}"),
        }
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

    use super::RangeSelector;
    use crate::core::identifiers::SheetName;

    /// Whole-sheet selectors render as the bare sheet name.
    #[test]
    fn sheet_selector_renders_bare_name() {
        let selector = RangeSelector::sheet(SheetName::new("Orders"));
        assert_eq!(selector.as_a1(), "Orders");
        assert_eq!(selector.to_string(), "Orders");
    }

    /// Anchored selectors render the 1-based row after column A.
    #[test]
    fn anchor_selector_renders_a1_row() {
        let selector = RangeSelector::anchor(SheetName::new("Orders"), 5);
        assert_eq!(selector.as_a1(), "Orders!A5");
        assert_eq!(selector.to_string(), "Orders!A5");
    }
}
