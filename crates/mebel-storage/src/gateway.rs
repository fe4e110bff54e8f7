//! # Persistence Gateway
//!
//! Owns the two file paths and routes reads and writes to the codecs.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Persistence Gateway                                │
//! │                                                                         │
//! │  StorageConfig::new(dir) ← Resolve file paths                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PersistenceGateway::new(&config)                                       │
//! │       │                                                                 │
//! │       ├── load_or_seed_catalog() ──► catalog.rs   (snapshot)           │
//! │       ├── save_catalog(&store)   ──► catalog.rs   (temp + rename)      │
//! │       │                                                                 │
//! │       ├── append_transaction(&t) ──► ledger_file.rs (append + sync)    │
//! │       └── load_ledger()          ──► ledger_file.rs (full re-read)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gateway holds no records itself. Callers decide when to save; the
//! [`Inventory`](crate::Inventory) handle saves after every mutation.

use std::path::{Path, PathBuf};

use mebel_core::{ProductStore, TransactionRecord};
use tracing::{debug, info};

use crate::catalog;
use crate::config::StorageConfig;
use crate::error::StorageResult;
use crate::ledger_file;
use crate::seed;

/// File-backed persistence for the catalog and the ledger.
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    catalog_path: PathBuf,
    ledger_path: PathBuf,
}

impl PersistenceGateway {
    /// Creates a gateway for the paths in `config`. Touches no files.
    pub fn new(config: &StorageConfig) -> Self {
        PersistenceGateway {
            catalog_path: config.catalog_path(),
            ledger_path: config.ledger_path(),
        }
    }

    /// Path of the catalog snapshot.
    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Path of the ledger file.
    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Loads the snapshot. `Ok(None)` means no snapshot exists yet.
    ///
    /// ## Returns
    /// * `Ok(Some(store))` - Every row parsed
    /// * `Ok(None)` - File does not exist
    /// * `Err(MalformedRecord)` - A row is bad; nothing is returned
    pub fn load_catalog(&self) -> StorageResult<Option<ProductStore>> {
        let store = catalog::read_catalog(&self.catalog_path)?;

        if let Some(store) = &store {
            info!(
                path = %self.catalog_path.display(),
                products = store.len(),
                "Catalog loaded"
            );
        }

        Ok(store)
    }

    /// Writes the whole store over the snapshot.
    pub fn save_catalog(&self, store: &ProductStore) -> StorageResult<()> {
        debug!(
            path = %self.catalog_path.display(),
            products = store.len(),
            "Saving catalog snapshot"
        );
        catalog::write_catalog(&self.catalog_path, store)
    }

    /// Loads the snapshot, or writes and returns the seed catalog if none exists.
    pub fn load_or_seed_catalog(&self) -> StorageResult<ProductStore> {
        if let Some(store) = self.load_catalog()? {
            return Ok(store);
        }

        let store = seed::seed_store()?;
        self.save_catalog(&store)?;

        info!(
            path = %self.catalog_path.display(),
            products = store.len(),
            "No catalog found, seeded sample products"
        );

        Ok(store)
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Durably appends one transaction.
    pub fn append_transaction(&self, txn: &TransactionRecord) -> StorageResult<()> {
        debug!(
            transaction_id = %txn.transaction_id,
            product_code = %txn.product_code,
            quantity = txn.quantity,
            "Appending transaction"
        );
        ledger_file::append_transaction(&self.ledger_path, txn)
    }

    /// Re-reads the whole ledger in append order.
    pub fn load_ledger(&self) -> StorageResult<Vec<TransactionRecord>> {
        let transactions = ledger_file::read_ledger(&self.ledger_path)?;
        debug!(count = transactions.len(), "Ledger loaded");
        Ok(transactions)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mebel_core::Money;
    use tempfile::TempDir;

    fn gateway(dir: &TempDir) -> PersistenceGateway {
        PersistenceGateway::new(&StorageConfig::new(dir.path()))
    }

    #[test]
    fn test_seed_written_when_missing() {
        let dir = TempDir::new().unwrap();
        let gw = gateway(&dir);

        assert!(gw.load_catalog().unwrap().is_none());

        let store = gw.load_or_seed_catalog().unwrap();
        assert_eq!(store.len(), 5);
        assert!(gw.catalog_path().exists());

        let reloaded = gw.load_catalog().unwrap().unwrap();
        assert_eq!(reloaded.list_all(), store.list_all());
    }

    #[test]
    fn test_existing_snapshot_is_not_reseeded() {
        let dir = TempDir::new().unwrap();
        let gw = gateway(&dir);

        gw.save_catalog(&ProductStore::new()).unwrap();

        let store = gw.load_or_seed_catalog().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_ledger_roundtrip() {
        let dir = TempDir::new().unwrap();
        let gw = gateway(&dir);

        let txn = TransactionRecord {
            transaction_id: "TRX20250101100000".to_string(),
            timestamp: "2025-01-01 10:00:00".to_string(),
            product_code: "SF001".to_string(),
            product_name: "Sofa Minimalis 3 Seater".to_string(),
            quantity: 2,
            unit_price: Money::from_major(3_500_000),
            total: Money::from_major(7_000_000),
        };

        gw.append_transaction(&txn).unwrap();
        assert_eq!(gw.load_ledger().unwrap(), vec![txn]);
    }
}
