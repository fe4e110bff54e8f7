//! # Catalog Snapshot Codec
//!
//! Reads and writes the full product catalog as one CSV file.
//!
//! ## File Layout
//! ```text
//! code,name,category_key,unit_price,stock_quantity
//! SF001,Sofa Minimalis 3 Seater,SOFA,3500000.00,5
//! MJ001,Meja Makan Kayu Jati,MEJA,2500000.00,3
//! ```
//!
//! ## Write Path
//! ```text
//! ProductStore ──► furniture_inventory.csv.tmp ──► fsync ──► rename
//!                                                          │
//!                               furniture_inventory.csv ◄──┘
//! ```
//! A crash mid-write leaves the previous snapshot intact.
//!
//! Files written with the older Indonesian headers
//! (`kode_produk,nama,kategori,harga,stok`) are read transparently.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use mebel_core::{Money, ProductRecord, ProductStore};
use serde::{Deserialize, Serialize};

use crate::error::{csv_error, io_error, read_failure, StorageError, StorageResult};

/// Column names of the snapshot, in file order.
pub const CATALOG_HEADER: [&str; 5] = ["code", "name", "category_key", "unit_price", "stock_quantity"];

/// One snapshot row as text.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogRow {
    #[serde(alias = "kode_produk")]
    code: String,
    #[serde(alias = "nama")]
    name: String,
    #[serde(alias = "kategori")]
    category_key: String,
    #[serde(alias = "harga")]
    unit_price: String,
    #[serde(alias = "stok")]
    stock_quantity: String,
}

impl CatalogRow {
    fn from_record(product: &ProductRecord) -> Self {
        CatalogRow {
            code: product.code.clone(),
            name: product.name.clone(),
            category_key: product.category_key.clone(),
            unit_price: product.unit_price.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
        }
    }

    /// Converts the text row into a record, or a reason it is malformed.
    fn into_record(self) -> Result<ProductRecord, String> {
        if self.code.is_empty() {
            return Err("code is empty".to_string());
        }

        let unit_price: Money = self
            .unit_price
            .parse()
            .map_err(|_| format!("unit_price '{}' is not a decimal number", self.unit_price))?;
        if unit_price.is_negative() {
            return Err(format!("unit_price {} is negative", unit_price));
        }

        let stock_quantity: i64 = self
            .stock_quantity
            .trim()
            .parse()
            .map_err(|_| format!("stock_quantity '{}' is not an integer", self.stock_quantity))?;
        if stock_quantity < 0 {
            return Err(format!("stock_quantity {} is negative", stock_quantity));
        }

        Ok(ProductRecord {
            code: self.code,
            name: self.name,
            category_key: self.category_key,
            unit_price,
            stock_quantity,
        })
    }
}

// =============================================================================
// Read
// =============================================================================

/// Loads the snapshot at `path`.
///
/// Returns `Ok(None)` when the file does not exist. Any malformed row
/// fails the whole load.
pub fn read_catalog(path: &Path) -> StorageResult<Option<ProductStore>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_error(path, "open")(err)),
    };

    parse_catalog(file, path).map(Some)
}

/// Parses snapshot CSV from any reader. `path` only labels errors.
///
/// Text fields are kept byte for byte so a saved store reloads unchanged.
pub fn parse_catalog<R: Read>(reader: R, path: &Path) -> StorageResult<ProductStore> {
    let mut reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);
    let headers = reader.headers().map_err(|e| read_failure(path, e))?.clone();
    let file = path.display().to_string();

    let mut store = ProductStore::new();
    for result in reader.records() {
        let record = result.map_err(|e| read_failure(path, e))?;
        let line = record.position().map_or(0, |pos| pos.line());

        let row: CatalogRow = record
            .deserialize(Some(&headers))
            .map_err(|e| read_failure(path, e))?;
        let product = row
            .into_record()
            .map_err(|reason| StorageError::malformed(file.clone(), line, reason))?;

        store
            .append(product)
            .map_err(|err| StorageError::malformed(file.clone(), line, err.to_string()))?;
    }

    Ok(store)
}

// =============================================================================
// Write
// =============================================================================

/// Sibling temp file used while replacing the snapshot.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces the snapshot at `path` with the contents of `store`.
///
/// The header is always written, even for an empty store.
pub fn write_catalog(path: &Path, store: &ProductStore) -> StorageResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io_error(dir, "create directory"))?;
    }

    let tmp = temp_path(path);
    {
        let file = File::create(&tmp).map_err(io_error(&tmp, "create"))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        writer
            .write_record(CATALOG_HEADER)
            .map_err(csv_error(&tmp, "write"))?;
        for product in store {
            writer
                .serialize(CatalogRow::from_record(product))
                .map_err(csv_error(&tmp, "write"))?;
        }

        writer.flush().map_err(io_error(&tmp, "flush"))?;
        writer.get_ref().sync_all().map_err(io_error(&tmp, "sync"))?;
    }

    std::fs::rename(&tmp, path).map_err(io_error(path, "replace"))?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
