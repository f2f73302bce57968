// crates/gridbook-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Sheet Store
// Description: Simple in-memory sheet store for tests and examples.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: async-trait, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of [`SheetStore`]
//! for tests and local demos, plus a clonable wrapper for sharing any store
//! behind an `Arc`. The in-memory grids mirror remote value semantics: reads
//! return only populated rows and writes address 1-based anchor rows.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::identifiers::SheetName;
use crate::core::selector::RangeSelector;
use crate::interfaces::SheetStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory sheet store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemorySheetStore {
    /// Sheet grids keyed by sheet name, protected by a mutex.
    sheets: Arc<Mutex<BTreeMap<String, Vec<Vec<String>>>>>,
}

impl InMemorySheetStore {
    /// Creates a new in-memory sheet store with no sheets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sheets: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Creates or replaces a sheet with the given grid.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn insert_sheet(
        &self,
        name: impl Into<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        let mut guard = self.lock_sheets()?;
        guard.insert(name.into(), rows);
        Ok(())
    }

    /// Returns a copy of the named sheet's grid, if the sheet exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn sheet(&self, name: &str) -> Result<Option<Vec<Vec<String>>>, StoreError> {
        let guard = self.lock_sheets()?;
        Ok(guard.get(name).cloned())
    }

    /// Locks the sheet map, mapping poisoning to a backend error.
    fn lock_sheets(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<Vec<String>>>>, StoreError> {
        self.sheets
            .lock()
            .map_err(|_| StoreError::Backend("sheet store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl SheetStore for InMemorySheetStore {
    async fn list_values(&self, selector: &RangeSelector) -> Result<Vec<Vec<String>>, StoreError> {
        let guard = self.lock_sheets()?;
        let grid = guard
            .get(selector.sheet_name().as_str())
            .ok_or_else(|| StoreError::SelectorNotFound(selector.as_a1()))?;
        match selector {
            RangeSelector::Sheet(_) => Ok(grid.clone()),
            RangeSelector::Anchor { row, .. } => {
                let start = row.saturating_sub(1);
                Ok(grid.get(start..).unwrap_or(&[]).to_vec())
            }
        }
    }

    async fn write_range(
        &self,
        selector: &RangeSelector,
        rows: &[Vec<String>],
    ) -> Result<(), StoreError> {
        let mut guard = self.lock_sheets()?;
        let grid = guard
            .get_mut(selector.sheet_name().as_str())
            .ok_or_else(|| StoreError::SelectorNotFound(selector.as_a1()))?;
        let start = match selector {
            RangeSelector::Sheet(_) => 0,
            RangeSelector::Anchor { row, .. } => row.saturating_sub(1),
        };
        while grid.len() < start + rows.len() {
            grid.push(Vec::new());
        }
        for (offset, row) in rows.iter().enumerate() {
            if let Some(slot) = grid.get_mut(start + offset) {
                *slot = row.clone();
            }
        }
        Ok(())
    }

    async fn append_rows(&self, sheet: &SheetName, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let mut guard = self.lock_sheets()?;
        let grid = guard
            .get_mut(sheet.as_str())
            .ok_or_else(|| StoreError::SelectorNotFound(sheet.as_str().to_string()))?;
        grid.extend(rows.iter().cloned());
        Ok(())
    }
}

// ============================================================================
// SECTION: Shared Store
// ============================================================================

/// Shared sheet store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedSheetStore {
    /// Inner store implementation.
    inner: Arc<dyn SheetStore>,
}

impl SharedSheetStore {
    /// Wraps a sheet store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl SheetStore + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn SheetStore>) -> Self {
        Self {
            inner: store,
        }
    }
}

#[async_trait]
impl SheetStore for SharedSheetStore {
    async fn list_values(&self, selector: &RangeSelector) -> Result<Vec<Vec<String>>, StoreError> {
        self.inner.list_values(selector).await
    }

    async fn write_range(
        &self,
        selector: &RangeSelector,
        rows: &[Vec<String>],
    ) -> Result<(), StoreError> {
        self.inner.write_range(selector, rows).await
    }

    async fn append_rows(&self, sheet: &SheetName, rows: &[Vec<String>]) -> Result<(), StoreError> {
        self.inner.append_rows(sheet, rows).await
    }
}
