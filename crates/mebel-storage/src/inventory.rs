//! # Inventory Handle
//!
//! The owned entry point that ties the stores to their files.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Every Mutation                                      │
//! │                                                                         │
//! │  add / update / delete                 process_sale                    │
//! │       │                                     │                           │
//! │       ▼                                     ▼                           │
//! │  normalize + validate              prepare_sale (all checks)           │
//! │       │                                     │                           │
//! │       ▼                                     ▼                           │
//! │  ProductStore mutation             ledger file append (durable)        │
//! │       │                                     │                           │
//! │       │                                     ▼                           │
//! │       │                            TransactionLedger::enqueue          │
//! │       │                                     │                           │
//! │       │                                     ▼                           │
//! │       │                            ProductStore::set_stock             │
//! │       │                                     │                           │
//! │       └──────────────┬──────────────────────┘                           │
//! │                      ▼                                                  │
//! │             save catalog snapshot                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! Rejections (validation, unknown code, insufficient stock, duplicate
//! code) happen before anything changes. A failed snapshot save after a
//! successful mutation leaves the in-memory change in place and returns
//! the error; the next successful save writes it out.

use chrono::{Local, NaiveDateTime};
use mebel_core::validation::{normalize_code, validate_new_product, validate_product_update};
use mebel_core::{
    prepare_sale, CategoryTable, InventoryReport, LedgerSummary, NewProduct, ProductRecord,
    ProductStore, ProductUpdate, TransactionLedger, TransactionRecord, UpdateOutcome,
};
use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::error::StorageResult;
use crate::gateway::PersistenceGateway;

/// Timestamp format written to the ledger.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefix of every generated transaction ID.
pub const TRANSACTION_ID_PREFIX: &str = "TRX";

/// Furniture inventory backed by a catalog snapshot and a ledger file.
///
/// ## Usage
/// ```rust,ignore
/// let mut inventory = Inventory::open(StorageConfig::new("./data"))?;
///
/// let txn = inventory.sell("SF001", 2)?;
/// println!("{} total {}", txn.transaction_id, txn.total);
/// ```
#[derive(Debug)]
pub struct Inventory {
    config: StorageConfig,
    gateway: PersistenceGateway,
    categories: CategoryTable,
    products: ProductStore,
    ledger: TransactionLedger,
}

impl Inventory {
    /// Opens the inventory in `config.data_dir`.
    ///
    /// ## What This Does
    /// 1. Builds the default furniture category table
    /// 2. Loads the catalog snapshot, or seeds and writes one if missing
    /// 3. Hydrates the in-memory ledger from the ledger file
    ///
    /// ## Returns
    /// * `Ok(Inventory)` - Ready to use
    /// * `Err(MalformedRecord)` - A persisted row could not be parsed
    /// * `Err(Io)` - A file could not be read, or the seed could not be written
    pub fn open(config: StorageConfig) -> StorageResult<Self> {
        info!(data_dir = %config.data_dir.display(), "Opening inventory");

        let gateway = PersistenceGateway::new(&config);
        let categories = CategoryTable::furniture();
        let products = gateway.load_or_seed_catalog()?;

        for product in &products {
            if !categories.contains(&product.category_key) {
                warn!(
                    code = %product.code,
                    category = %product.category_key,
                    "Product has an unknown category"
                );
            }
        }

        let ledger: TransactionLedger = gateway.load_ledger()?.into_iter().collect();

        info!(
            products = products.len(),
            transactions = ledger.len(),
            "Inventory ready"
        );

        Ok(Inventory {
            config,
            gateway,
            categories,
            products,
            ledger,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The configuration this inventory was opened with.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    /// Sales recorded since startup, including those hydrated from disk.
    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    /// Looks up a product by code, in any case and with surrounding spaces.
    pub fn find_product(&self, code: &str) -> Option<&ProductRecord> {
        self.products.search(&normalize_code(code))
    }

    // =========================================================================
    // Catalog Mutations
    // =========================================================================

    /// Validates and adds a product, then saves the snapshot.
    ///
    /// ## Returns
    /// * `Ok(record)` - The stored record (code normalized, name trimmed)
    /// * `Err(Core(Validation))` - A field broke a rule; nothing changed
    /// * `Err(Core(DuplicateKey))` - Code already present; nothing changed
    pub fn add_product(&mut self, input: NewProduct) -> StorageResult<ProductRecord> {
        let record = validate_new_product(input, &self.categories)?;
        debug!(code = %record.code, "Adding product");

        self.products.append(record.clone())?;
        self.gateway.save_catalog(&self.products)?;

        Ok(record)
    }

    /// Applies a partial update, saving only when a field was written.
    pub fn update_product(
        &mut self,
        code: &str,
        mut update: ProductUpdate,
    ) -> StorageResult<UpdateOutcome> {
        let code = normalize_code(code);
        validate_product_update(&update, &self.categories)?;
        if let Some(name) = update.name.as_mut() {
            *name = name.trim().to_string();
        }

        debug!(code = %code, "Updating product");
        let outcome = self.products.update(&code, &update);

        if outcome == UpdateOutcome::Updated {
            self.gateway.save_catalog(&self.products)?;
        }

        Ok(outcome)
    }

    /// Deletes a product. Returns `false` if the code was not present.
    pub fn delete_product(&mut self, code: &str) -> StorageResult<bool> {
        let code = normalize_code(code);
        debug!(code = %code, "Deleting product");

        if !self.products.delete(&code) {
            return Ok(false);
        }

        self.gateway.save_catalog(&self.products)?;
        Ok(true)
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Sells `quantity` units of `code`, stamped with the local clock.
    pub fn sell(&mut self, code: &str, quantity: i64) -> StorageResult<TransactionRecord> {
        self.process_sale(code, quantity, Local::now().naive_local())
    }

    /// Sells `quantity` units of `code` at time `now`.
    ///
    /// ## Steps
    /// 1. Check quantity, existence and stock (no mutation yet)
    /// 2. Append the record to the ledger file
    /// 3. Enqueue it in memory
    /// 4. Decrement stock and save the snapshot
    ///
    /// ## Returns
    /// * `Ok(record)` - The committed transaction
    /// * `Err(Core(..))` - Rejected; store, ledger and files untouched
    /// * `Err(Io | Csv)` - Ledger append failed (nothing changed) or the
    ///   snapshot save failed (sale is recorded, snapshot is stale)
    pub fn process_sale(
        &mut self,
        code: &str,
        quantity: i64,
        now: NaiveDateTime,
    ) -> StorageResult<TransactionRecord> {
        let code = normalize_code(code);
        let transaction_id = self.next_transaction_id(now);
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();

        let sale = prepare_sale(&self.products, &code, quantity, transaction_id, timestamp)?;

        self.gateway.append_transaction(&sale.record)?;
        self.ledger.enqueue(sale.record.clone());

        let outcome = self.products.set_stock(&code, sale.remaining_stock);
        debug_assert_eq!(outcome, UpdateOutcome::Updated);
        self.gateway.save_catalog(&self.products)?;

        info!(
            transaction_id = %sale.record.transaction_id,
            code = %code,
            quantity,
            total = %sale.record.total,
            "Sale recorded"
        );

        Ok(sale.record)
    }

    /// Next transaction ID for a sale at `now`.
    ///
    /// `TRX` followed by the local second; repeated seconds get `-1`, `-2`, ...
    pub fn next_transaction_id(&self, now: NaiveDateTime) -> String {
        let stem = format!("{}{}", TRANSACTION_ID_PREFIX, now.format("%Y%m%d%H%M%S"));

        let Some(last) = self.ledger.last() else {
            return stem;
        };

        match last.transaction_id.strip_prefix(stem.as_str()) {
            Some("") => format!("{stem}-1"),
            Some(rest) => match rest.strip_prefix('-').and_then(|n| n.parse::<u32>().ok()) {
                Some(n) => format!("{stem}-{}", n + 1),
                None => stem,
            },
            None => stem,
        }
    }

    // =========================================================================
    // History & Reports
    // =========================================================================

    /// Full transaction history, re-read from the ledger file.
    pub fn history(&self) -> StorageResult<Vec<TransactionRecord>> {
        self.gateway.load_ledger()
    }

    /// Catalog summary flagging products with stock below `low_stock_threshold`.
    pub fn report(&self, low_stock_threshold: i64) -> StorageResult<InventoryReport> {
        let report = InventoryReport::build(&self.products, &self.categories, low_stock_threshold)?;
        Ok(report)
    }

    /// Totals over the ledger file.
    pub fn ledger_summary(&self) -> StorageResult<LedgerSummary> {
        let history = self.history()?;
        let summary = LedgerSummary::build(&history)?;
        Ok(summary)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use chrono::NaiveDate;
    use mebel_core::{CoreError, Money, ValidationError};
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn open(dir: &TempDir) -> Inventory {
        Inventory::open(StorageConfig::new(dir.path())).unwrap()
    }

    fn read(path: &std::path::Path) -> String {
        std::fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn test_open_seeds_empty_directory() {
        let dir = TempDir::new().unwrap();
        let inventory = open(&dir);

        assert_eq!(inventory.products().len(), 5);
        assert!(inventory.ledger().is_empty());
        assert!(inventory.config().catalog_path().exists());
    }

    #[test]
    fn test_sale_decrements_stock_and_records_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let txn = inventory.process_sale("SF001", 2, at(10, 0, 0)).unwrap();

        assert_eq!(txn.transaction_id, "TRX20250101100000");
        assert_eq!(txn.timestamp, "2025-01-01 10:00:00");
        assert_eq!(txn.product_name, "Sofa Minimalis 3 Seater");
        assert_eq!(txn.unit_price, Money::from_major(3_500_000));
        assert_eq!(txn.total, Money::from_major(7_000_000));
        assert_eq!(inventory.find_product("SF001").unwrap().stock_quantity, 3);
        assert_eq!(inventory.ledger().len(), 1);

        let reopened = open(&dir);
        assert_eq!(reopened.find_product("SF001").unwrap().stock_quantity, 3);
        assert_eq!(reopened.history().unwrap(), vec![txn]);
    }

    #[test]
    fn test_oversell_leaves_everything_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);
        let catalog_before = read(&inventory.config().catalog_path());

        let err = inventory.process_sale("SF001", 6, at(10, 0, 0)).unwrap_err();

        assert!(matches!(
            err,
            StorageError::Core(CoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            })
        ));
        assert_eq!(inventory.find_product("SF001").unwrap().stock_quantity, 5);
        assert!(inventory.ledger().is_empty());
        assert_eq!(read(&inventory.config().catalog_path()), catalog_before);
        assert!(!inventory.config().ledger_path().exists());
    }

    #[test]
    fn test_zero_quantity_and_unknown_code_rejected() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let err = inventory.process_sale("SF001", 0, at(10, 0, 0)).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Core(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let err = inventory.process_sale("XX999", 1, at(10, 0, 0)).unwrap_err();
        assert!(matches!(err, StorageError::Core(CoreError::ProductNotFound(_))));

        assert!(inventory.ledger().is_empty());
        assert!(!inventory.config().ledger_path().exists());
    }

    #[test]
    fn test_selling_all_stock_keeps_product() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        inventory.process_sale("lm001", 2, at(10, 0, 0)).unwrap();

        let wardrobe = inventory.find_product("LM001").unwrap();
        assert_eq!(wardrobe.stock_quantity, 0);
    }

    #[test]
    fn test_ledger_order_survives_reload() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let t1 = inventory.process_sale("SF001", 1, at(10, 0, 0)).unwrap();
        let t2 = inventory.process_sale("DK001", 3, at(10, 5, 0)).unwrap();

        let reopened = open(&dir);
        let ids: Vec<_> = reopened
            .ledger()
            .iter()
            .map(|t| t.transaction_id.clone())
            .collect();
        assert_eq!(ids, vec![t1.transaction_id, t2.transaction_id]);
    }

    #[test]
    fn test_same_second_ids_are_unique() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let t1 = inventory.process_sale("SF001", 1, at(10, 0, 0)).unwrap();
        let t2 = inventory.process_sale("SF001", 1, at(10, 0, 0)).unwrap();
        let t3 = inventory.process_sale("SF001", 1, at(10, 0, 0)).unwrap();

        assert_eq!(t1.transaction_id, "TRX20250101100000");
        assert_eq!(t2.transaction_id, "TRX20250101100000-1");
        assert_eq!(t3.transaction_id, "TRX20250101100000-2");
        assert_eq!(inventory.next_transaction_id(at(10, 0, 1)), "TRX20250101100001");
    }

    #[test]
    fn test_add_update_delete_persist() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let added = inventory
            .add_product(NewProduct {
                code: " sf002 ".to_string(),
                name: "Sofa Bed".to_string(),
                category_key: "SOFA".to_string(),
                unit_price: Money::from_major(2_000_000),
                stock_quantity: 4,
            })
            .unwrap();
        assert_eq!(added.code, "SF002");

        let outcome = inventory
            .update_product("SF002", ProductUpdate::default().unit_price(Money::from_major(1_750_000)))
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);

        assert!(inventory.delete_product("MJ001").unwrap());
        assert!(!inventory.delete_product("MJ001").unwrap());

        let reopened = open(&dir);
        let codes: Vec<_> = reopened.products().iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["SF001", "LM001", "TT001", "DK001", "SF002"]);
        assert_eq!(
            reopened.find_product("SF002").unwrap().unit_price,
            Money::from_major(1_750_000)
        );
    }

    #[test]
    fn test_update_outcomes() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        assert_eq!(
            inventory.update_product("SF001", ProductUpdate::default()).unwrap(),
            UpdateOutcome::NoChanges
        );
        assert_eq!(
            inventory
                .update_product("NOPE", ProductUpdate::default().stock_quantity(1))
                .unwrap(),
            UpdateOutcome::NotFound
        );

        let err = inventory
            .update_product("SF001", ProductUpdate::default().category_key("GARDEN"))
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Core(CoreError::Validation(ValidationError::UnknownCategory { .. }))
        ));
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let err = inventory
            .add_product(NewProduct {
                code: "sf001".to_string(),
                name: "Another Sofa".to_string(),
                category_key: "SOFA".to_string(),
                unit_price: Money::from_major(1),
                stock_quantity: 1,
            })
            .unwrap_err();

        assert!(matches!(err, StorageError::Core(CoreError::DuplicateKey { .. })));
        assert_eq!(inventory.products().len(), 5);
    }

    #[test]
    fn test_ledger_write_failure_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);
        let catalog_before = read(&inventory.config().catalog_path());

        // A directory where the ledger file should be makes the append fail
        std::fs::create_dir(inventory.config().ledger_path()).unwrap();

        let err = inventory.process_sale("SF001", 2, at(10, 0, 0)).unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert!(err.is_persistence_failure());
        assert!(inventory.ledger().is_empty());
        assert_eq!(inventory.find_product("SF001").unwrap().stock_quantity, 5);
        assert_eq!(read(&inventory.config().catalog_path()), catalog_before);
    }

    #[test]
    fn test_catalog_write_failure_keeps_added_product() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let catalog = inventory.config().catalog_path();
        std::fs::remove_file(&catalog).unwrap();
        std::fs::create_dir(&catalog).unwrap();

        let err = inventory
            .add_product(NewProduct {
                code: "SF002".to_string(),
                name: "Sofa Bed".to_string(),
                category_key: "SOFA".to_string(),
                unit_price: Money::from_major(2_000_000),
                stock_quantity: 4,
            })
            .unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert!(err.is_persistence_failure());
        assert_eq!(inventory.products().len(), 6);
        assert_eq!(inventory.find_product("SF002").unwrap().stock_quantity, 4);
    }

    #[test]
    fn test_catalog_write_failure_after_sale_keeps_sale() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let catalog = inventory.config().catalog_path();
        std::fs::remove_file(&catalog).unwrap();
        std::fs::create_dir(&catalog).unwrap();

        let err = inventory.process_sale("SF001", 2, at(10, 0, 0)).unwrap_err();

        assert!(err.is_persistence_failure());
        assert_eq!(inventory.ledger().len(), 1);
        assert_eq!(inventory.history().unwrap().len(), 1);
        assert_eq!(inventory.find_product("SF001").unwrap().stock_quantity, 3);
    }

    #[test]
    fn test_report_and_summary() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);
        inventory.process_sale("DK001", 4, at(9, 0, 0)).unwrap();

        let report = inventory
            .report(inventory.config().low_stock_threshold)
            .unwrap();
        assert_eq!(report.total_products, 5);
        let low: Vec<_> = report.low_stock.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(low, vec!["MJ001", "LM001", "TT001"]);

        let summary = inventory.ledger_summary().unwrap();
        assert_eq!(summary.transaction_count, 1);
        assert_eq!(summary.total_revenue, Money::from_major(1_000_000));
    }
}
