//! # Product Store
//!
//! Insertion-ordered collection of [`ProductRecord`]s keyed by product code.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ProductStore                                     │
//! │                                                                         │
//! │  records: Vec<ProductRecord>     (listing order = insertion order)      │
//! │  ┌───────┬───────┬───────┬───────┐                                     │
//! │  │ SF001 │ MJ001 │ LM001 │ TT001 │                                     │
//! │  └───────┴───────┴───────┴───────┘                                     │
//! │      0       1       2       3                                          │
//! │                                                                         │
//! │  index: HashMap<code, position>                                         │
//! │  { SF001→0, MJ001→1, LM001→2, TT001→3 }                                │
//! │                                                                         │
//! │  delete("MJ001"):                                                       │
//! │  ┌───────┬───────┬───────┐                                             │
//! │  │ SF001 │ LM001 │ TT001 │   later records shift left by one,          │
//! │  └───────┴───────┴───────┘   their index entries are rewritten         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one record per code; `index` always mirrors `records`.
//! - Lookups are exact and case-sensitive. Callers normalize codes first.
//! - Nothing here touches the filesystem. Saving after a mutation is the
//!   caller's job (the storage crate's `Inventory` does it).

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{ProductRecord, ProductUpdate, UpdateOutcome};

/// Ordered, code-keyed product collection.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    records: Vec<ProductRecord>,
    index: HashMap<String, usize>,
}

impl ProductStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ProductStore::default()
    }

    /// Builds a store from records in order.
    ///
    /// ## Returns
    /// * `Err(CoreError::DuplicateKey)` - two records share a code
    pub fn from_records(records: impl IntoIterator<Item = ProductRecord>) -> CoreResult<Self> {
        let mut store = ProductStore::new();
        for record in records {
            store.append(record)?;
        }
        Ok(store)
    }

    /// Appends a record at the tail.
    ///
    /// ## Returns
    /// * `Ok(())` - record inserted, size grew by one
    /// * `Err(CoreError::DuplicateKey)` - code already present, store unchanged
    pub fn append(&mut self, record: ProductRecord) -> CoreResult<()> {
        if self.index.contains_key(&record.code) {
            return Err(CoreError::duplicate(&record.code));
        }

        self.index.insert(record.code.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Finds the record with this exact code.
    pub fn search(&self, code: &str) -> Option<&ProductRecord> {
        self.index.get(code).map(|&pos| &self.records[pos])
    }

    /// Checks whether a record with this code exists.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Merges the present fields of `update` into the record for `code`.
    ///
    /// ## Returns
    /// * `UpdateOutcome::Updated` - at least one field written
    /// * `UpdateOutcome::NoChanges` - record exists, patch was empty
    /// * `UpdateOutcome::NotFound` - no record has this code
    pub fn update(&mut self, code: &str, update: &ProductUpdate) -> UpdateOutcome {
        let Some(&pos) = self.index.get(code) else {
            return UpdateOutcome::NotFound;
        };

        if self.records[pos].apply(update) {
            UpdateOutcome::Updated
        } else {
            UpdateOutcome::NoChanges
        }
    }

    /// Sets the stock quantity of one record.
    pub fn set_stock(&mut self, code: &str, stock_quantity: i64) -> UpdateOutcome {
        self.update(code, &ProductUpdate::default().stock_quantity(stock_quantity))
    }

    /// Removes the record for `code`, keeping the order of the rest.
    ///
    /// Returns `false` (and leaves the size unchanged) when absent.
    pub fn delete(&mut self, code: &str) -> bool {
        let Some(pos) = self.index.remove(code) else {
            return false;
        };

        self.records.remove(pos);
        for (offset, record) in self.records[pos..].iter().enumerate() {
            self.index.insert(record.code.clone(), pos + offset);
        }

        true
    }

    /// Returns an owned copy of every record in insertion order.
    ///
    /// Later mutations of the store do not affect the returned vector.
    pub fn list_all(&self) -> Vec<ProductRecord> {
        self.records.clone()
    }

    /// Iterates records in insertion order without copying.
    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProductStore {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
