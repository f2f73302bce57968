// crates/gridbook-core/tests/store.rs
// ============================================================================
// Module: In-Memory Store Tests
// Description: Validate value-grid semantics of the in-memory sheet store.
// Purpose: Ensure reads, anchored writes, and appends mirror remote behavior.
// Dependencies: gridbook-core, tokio
// ============================================================================

//! ## Overview
//! Behavior tests for the in-memory store: whole-sheet and anchored reads,
//! anchored overwrites that extend the grid, appends after the last row, and
//! shared-wrapper delegation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use gridbook_core::InMemorySheetStore;
use gridbook_core::RangeSelector;
use gridbook_core::SharedSheetStore;
use gridbook_core::SheetName;
use gridbook_core::SheetStore;
use gridbook_core::StoreError;

/// Builds string rows from string slices.
fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| (*cell).to_string()).collect()
}

/// Reading an unknown sheet reports the selector, not a backend fault.
#[tokio::test]
async fn missing_sheet_is_selector_not_found() {
    let store = InMemorySheetStore::new();
    let result = store
        .list_values(&RangeSelector::sheet(SheetName::new("Nowhere")))
        .await;
    assert!(matches!(result, Err(StoreError::SelectorNotFound(_))));
}

/// Anchored reads start at the 1-based anchor row.
#[tokio::test]
async fn anchored_read_starts_at_row() {
    let store = InMemorySheetStore::new();
    store
        .insert_sheet("Orders", vec![row(&["a"]), row(&["b"]), row(&["c"])])
        .unwrap();
    let values = store
        .list_values(&RangeSelector::anchor(SheetName::new("Orders"), 2))
        .await
        .unwrap();
    assert_eq!(values, vec![row(&["b"]), row(&["c"])]);
}

/// Anchored writes replace the addressed row and keep neighbors.
#[tokio::test]
async fn anchored_write_replaces_row() {
    let store = InMemorySheetStore::new();
    store
        .insert_sheet("Orders", vec![row(&["a"]), row(&["b"]), row(&["c"])])
        .unwrap();
    store
        .write_range(
            &RangeSelector::anchor(SheetName::new("Orders"), 2),
            &[row(&["B", "extra"])],
        )
        .await
        .unwrap();
    let grid = store.sheet("Orders").unwrap().unwrap();
    assert_eq!(grid, vec![row(&["a"]), row(&["B", "extra"]), row(&["c"])]);
}

/// Writing past the last row extends the grid with blank rows.
#[tokio::test]
async fn anchored_write_extends_grid() {
    let store = InMemorySheetStore::new();
    store.insert_sheet("Orders", vec![row(&["a"])]).unwrap();
    store
        .write_range(
            &RangeSelector::anchor(SheetName::new("Orders"), 4),
            &[row(&["far"])],
        )
        .await
        .unwrap();
    let grid = store.sheet("Orders").unwrap().unwrap();
    assert_eq!(grid.len(), 4);
    assert_eq!(grid[0], row(&["a"]));
    assert!(grid[1].is_empty());
    assert!(grid[2].is_empty());
    assert_eq!(grid[3], row(&["far"]));
}

/// Appends land after the last populated row in order.
#[tokio::test]
async fn append_extends_after_last_row() {
    let store = InMemorySheetStore::new();
    store.insert_sheet("Orders", vec![row(&["header"])]).unwrap();
    store
        .append_rows(&SheetName::new("Orders"), &[row(&["one"]), row(&["two"])])
        .await
        .unwrap();
    let grid = store.sheet("Orders").unwrap().unwrap();
    assert_eq!(grid, vec![row(&["header"]), row(&["one"]), row(&["two"])]);
}

/// Overlapping writers resolve to whichever wrote last.
#[tokio::test]
async fn last_write_wins_on_same_selector() {
    let store = InMemorySheetStore::new();
    store.insert_sheet("Orders", vec![row(&["old"])]).unwrap();
    let selector = RangeSelector::anchor(SheetName::new("Orders"), 1);
    store.write_range(&selector, &[row(&["first"])]).await.unwrap();
    store.write_range(&selector, &[row(&["second"])]).await.unwrap();
    let grid = store.sheet("Orders").unwrap().unwrap();
    assert_eq!(grid, vec![row(&["second"])]);
}

/// The shared wrapper delegates to the wrapped store.
#[tokio::test]
async fn shared_store_delegates() {
    let store = InMemorySheetStore::new();
    store.insert_sheet("Orders", vec![row(&["kept"])]).unwrap();
    let shared = SharedSheetStore::from_store(store);
    let values = shared
        .list_values(&RangeSelector::sheet(SheetName::new("Orders")))
        .await
        .unwrap();
    assert_eq!(values, vec![row(&["kept"])]);
}
