// crates/gridbook-core/src/runtime/repository.rs
// ============================================================================
// Module: Keyed Record Repository
// Description: Keyed list, find, append, and patch over one sheet.
// Purpose: Give handlers record-level access with layout-driven semantics.
// Dependencies: crate::core, crate::interfaces, crate::runtime::mapper
// ============================================================================

//! ## Overview
//! A [`SheetRepository`] binds a store, a sheet name, and a layout into a
//! keyed record collection. Every operation re-reads the live grid, so row
//! positions are recomputed from the current data and never cached across
//! calls. Key lookups match the key column by exact string equality and
//! return the first matching row when duplicates exist.

use crate::core::identifiers::SheetName;
use crate::core::layout::SheetLayout;
use crate::core::record::FoundRecord;
use crate::core::record::Record;
use crate::core::selector::RangeSelector;
use crate::interfaces::SheetStore;
use crate::interfaces::StoreError;
use crate::runtime::mapper::RowMapper;
use crate::runtime::mapper::SheetRegions;

// ============================================================================
// SECTION: Snapshots
// ============================================================================

/// Owned copy of a sheet's header and data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSnapshot {
    /// The header row naming every column.
    pub header: Vec<String>,
    /// Data rows below the header, possibly empty.
    pub data: Vec<Vec<String>>,
}

// ============================================================================
// SECTION: Repository
// ============================================================================

/// Keyed record collection stored in one sheet.
#[derive(Debug, Clone)]
pub struct SheetRepository<S> {
    /// Backend the repository reads and writes through.
    store: S,
    /// Sheet holding the collection.
    sheet: SheetName,
    /// Structural layout of the sheet.
    layout: SheetLayout,
    /// Codec between rows and records.
    mapper: RowMapper,
}

impl<S: SheetStore> SheetRepository<S> {
    /// Creates a repository over the given store, sheet, and layout.
    #[must_use]
    pub const fn new(store: S, sheet: SheetName, layout: SheetLayout) -> Self {
        Self {
            store,
            sheet,
            layout,
            mapper: RowMapper::new(layout),
        }
    }

    /// Reads the live grid and returns an owned header-and-data snapshot, or
    /// `None` when the sheet has no header row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend read fails.
    pub async fn snapshot(&self) -> Result<Option<SheetSnapshot>, StoreError> {
        let grid = self.read_grid().await?;
        let Some(regions) = self.mapper.split(&grid) else {
            return Ok(None);
        };
        Ok(Some(SheetSnapshot {
            header: regions.header.to_vec(),
            data: regions.data.to_vec(),
        }))
    }

    /// Lists every record in the sheet in row order. A sheet without a
    /// header row, or with a header and no data rows, lists as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend read fails.
    pub async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let grid = self.read_grid().await?;
        let Some(regions) = self.mapper.split(&grid) else {
            return Ok(Vec::new());
        };
        let mut records = Vec::new();
        for row in regions.data {
            if self.layout.skip_blank_keys && self.key_cell_is_blank(row) {
                continue;
            }
            records.push(self.decode_record(regions.header, row));
        }
        Ok(records)
    }

    /// Finds the first record whose key column equals `key` exactly. A miss
    /// is a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend read fails.
    pub async fn find_by_key(&self, key: &str) -> Result<Option<FoundRecord>, StoreError> {
        let grid = self.read_grid().await?;
        let Some(regions) = self.mapper.split(&grid) else {
            return Ok(None);
        };
        Ok(self.locate(&regions, key))
    }

    /// Encodes the record against the live header and appends it after the
    /// last populated row. Returns the record as the sheet will decode it,
    /// with JSON columns normalized through the row codec.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails, or
    /// [`StoreError::Invalid`] when the sheet has no header row to encode
    /// against.
    pub async fn append(&self, record: &Record) -> Result<Record, StoreError> {
        let grid = self.read_grid().await?;
        let Some(regions) = self.mapper.split(&grid) else {
            return Err(StoreError::Invalid(format!(
                "sheet {} has no header row",
                self.sheet
            )));
        };
        let row = self.mapper.encode_row(regions.header, record);
        let decoded = self.decode_record(regions.header, &row);
        self.store.append_rows(&self.sheet, &[row]).await?;
        Ok(decoded)
    }

    /// Merges `patch` over the first record matching `key` and writes the
    /// merged row back to its current position. Returns the merged record as
    /// re-decoded from the written row, or `None` when no row matches.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend read or write fails.
    pub async fn update_by_key(
        &self,
        key: &str,
        patch: &Record,
    ) -> Result<Option<Record>, StoreError> {
        let grid = self.read_grid().await?;
        let Some(regions) = self.mapper.split(&grid) else {
            return Ok(None);
        };
        let Some(found) = self.locate(&regions, key) else {
            return Ok(None);
        };
        let mut merged = found.record;
        merged.merge(patch);
        let row = self.mapper.encode_row(&found.header, &merged);
        let decoded = self.decode_record(&found.header, &row);
        let selector = self.layout.write_selector(&self.sheet, found.data_index);
        self.store.write_range(&selector, &[row]).await?;
        Ok(Some(decoded))
    }

    /// Reads the whole sheet as a value grid.
    async fn read_grid(&self) -> Result<Vec<Vec<String>>, StoreError> {
        let selector = RangeSelector::sheet(self.sheet.clone());
        self.store.list_values(&selector).await
    }

    /// Finds the first data row matching `key` and decodes it.
    fn locate(&self, regions: &SheetRegions<'_>, key: &str) -> Option<FoundRecord> {
        regions.data.iter().enumerate().find_map(|(data_index, row)| {
            let cell = row.get(self.layout.key_column).map(String::as_str);
            if cell == Some(key) {
                Some(FoundRecord {
                    record: self.decode_record(regions.header, row),
                    data_index,
                    header: regions.header.to_vec(),
                })
            } else {
                None
            }
        })
    }

    /// Decodes one row, applying the layout's empty-field policy.
    fn decode_record(&self, header: &[String], row: &[String]) -> Record {
        let mut record = self.mapper.decode_row(header, row);
        if self.layout.drop_empty_fields {
            record.drop_empty_fields();
        }
        record
    }

    /// Returns whether the row's key cell is missing or blank.
    fn key_cell_is_blank(&self, row: &[String]) -> bool {
        row.get(self.layout.key_column)
            .is_none_or(|cell| cell.trim().is_empty())
    }
}
