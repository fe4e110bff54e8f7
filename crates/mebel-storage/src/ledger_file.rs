//! # Ledger File Codec
//!
//! Append-only CSV log of completed sales. This file, not the in-memory
//! queue, is the durable history.
//!
//! ## Append Semantics
//! - Opened in append mode for every sale
//! - Header written only when the file is new or empty
//! - Exactly one row per call, flushed and synced before returning
//!
//! ```text
//! transaction_id,timestamp,product_code,product_name,quantity,unit_price,total
//! TRX20250101100000,2025-01-01 10:00:00,SF001,Sofa Minimalis 3 Seater,2,3500000.00,7000000.00
//! ```

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use mebel_core::{Money, TransactionRecord};
use serde::{Deserialize, Serialize};

use crate::error::{csv_error, io_error, read_failure, StorageError, StorageResult};

/// Column names of the ledger, in file order.
pub const LEDGER_HEADER: [&str; 7] = [
    "transaction_id",
    "timestamp",
    "product_code",
    "product_name",
    "quantity",
    "unit_price",
    "total",
];

#[derive(Debug, Serialize, Deserialize)]
struct LedgerRow {
    #[serde(alias = "id_transaksi")]
    transaction_id: String,
    #[serde(alias = "tanggal")]
    timestamp: String,
    #[serde(alias = "kode_produk")]
    product_code: String,
    #[serde(alias = "nama_produk")]
    product_name: String,
    #[serde(alias = "jumlah")]
    quantity: String,
    #[serde(alias = "harga_satuan")]
    unit_price: String,
    total: String,
}

impl LedgerRow {
    fn from_record(txn: &TransactionRecord) -> Self {
        LedgerRow {
            transaction_id: txn.transaction_id.clone(),
            timestamp: txn.timestamp.clone(),
            product_code: txn.product_code.clone(),
            product_name: txn.product_name.clone(),
            quantity: txn.quantity.to_string(),
            unit_price: txn.unit_price.to_string(),
            total: txn.total.to_string(),
        }
    }

    fn into_record(self) -> Result<TransactionRecord, String> {
        let quantity: i64 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| format!("quantity '{}' is not an integer", self.quantity))?;
        if quantity <= 0 {
            return Err(format!("quantity {} is not positive", quantity));
        }

        let unit_price = parse_amount("unit_price", &self.unit_price)?;
        let total = parse_amount("total", &self.total)?;

        Ok(TransactionRecord {
            transaction_id: self.transaction_id,
            timestamp: self.timestamp,
            product_code: self.product_code,
            product_name: self.product_name,
            quantity,
            unit_price,
            total,
        })
    }
}

fn parse_amount(field: &str, text: &str) -> Result<Money, String> {
    text.parse()
        .map_err(|_| format!("{} '{}' is not a decimal number", field, text))
}

// =============================================================================
// Append
// =============================================================================

/// Appends one transaction row to the ledger at `path`.
pub fn append_transaction(path: &Path, txn: &TransactionRecord) -> StorageResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io_error(dir, "create directory"))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error(path, "open"))?;
    let is_empty = file.metadata().map_err(io_error(path, "stat"))?.len() == 0;

    // Row is encoded up front so the file sees a single write
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(&mut buf);
        if is_empty {
            writer
                .write_record(LEDGER_HEADER)
                .map_err(csv_error(path, "encode"))?;
        }
        writer
            .serialize(LedgerRow::from_record(txn))
            .map_err(csv_error(path, "encode"))?;
        writer.flush().map_err(io_error(path, "encode"))?;
    }

    file.write_all(&buf).map_err(io_error(path, "append to"))?;
    file.flush().map_err(io_error(path, "flush"))?;
    file.sync_data().map_err(io_error(path, "sync"))?;
    Ok(())
}

// =============================================================================
// Read
// =============================================================================

/// Reads every transaction in file order. A missing file is an empty ledger.
pub fn read_ledger(path: &Path) -> StorageResult<Vec<TransactionRecord>> {
    match File::open(path) {
        Ok(file) => parse_ledger(file, path),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(io_error(path, "open")(err)),
    }
}

/// Parses ledger CSV from any reader. `path` only labels errors.
pub fn parse_ledger<R: Read>(reader: R, path: &Path) -> StorageResult<Vec<TransactionRecord>> {
    let mut reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);
    let headers = reader.headers().map_err(|e| read_failure(path, e))?.clone();
    let file = path.display().to_string();

    let mut transactions = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| read_failure(path, e))?;
        let line = record.position().map_or(0, |pos| pos.line());

        let row: LedgerRow = record
            .deserialize(Some(&headers))
            .map_err(|e| read_failure(path, e))?;
        let txn = row
            .into_record()
            .map_err(|reason| StorageError::malformed(file.clone(), line, reason))?;
        transactions.push(txn);
    }

    Ok(transactions)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn txn(id: &str, code: &str, quantity: i64, price_major: i64) -> TransactionRecord {
        let unit_price = Money::from_major(price_major);
        TransactionRecord {
            transaction_id: id.to_string(),
            timestamp: "2025-01-01 10:00:00".to_string(),
            product_code: code.to_string(),
            product_name: format!("Product {code}"),
            quantity,
            unit_price,
            total: Money::from_cents(unit_price.cents() * quantity),
        }
    }

    #[test]
    fn test_missing_ledger_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_ledger(&dir.path().join("transactions.csv")).unwrap().is_empty());
    }

    #[test]
    fn test_appends_preserve_order_and_single_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.csv");

        append_transaction(&path, &txn("T1", "SF001", 2, 3_500_000)).unwrap();
        append_transaction(&path, &txn("T2", "DK001", 1, 250_000)).unwrap();
        append_transaction(&path, &txn("T3", "MJ001", 1, 2_500_000)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("transaction_id").count(), 1);
        assert_eq!(text.lines().count(), 4);

        let loaded = read_ledger(&path).unwrap();
        let ids: Vec<_> = loaded.iter().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2", "T3"]);
        assert_eq!(loaded[0].total, Money::from_major(7_000_000));
    }

    #[test]
    fn test_header_written_into_existing_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.csv");
        std::fs::write(&path, "").unwrap();

        append_transaction(&path, &txn("T1", "SF001", 1, 10)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("transaction_id,timestamp,"));
        assert_eq!(read_ledger(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_padded_product_name_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.csv");

        let mut sale = txn("T1", "sf001", 1, 10);
        sale.product_name = "  Sofa Sudut ".to_string();
        append_transaction(&path, &sale).unwrap();

        assert_eq!(read_ledger(&path).unwrap(), vec![sale]);
    }

    #[test]
    fn test_zero_quantity_row_is_malformed() {
        let csv = "transaction_id,timestamp,product_code,product_name,quantity,unit_price,total\n\
                   T1,2025-01-01 10:00:00,SF001,Sofa,0,10.00,0.00\n";

        let err = parse_ledger(csv.as_bytes(), Path::new("transactions.csv")).unwrap_err();
        assert!(matches!(err, StorageError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_legacy_headers_load() {
        let csv = "id_transaksi,tanggal,kode_produk,nama_produk,jumlah,harga_satuan,total\n\
                   TRX20240101120000,2024-01-01 12:00:00,SF001,Sofa Minimalis 3 Seater,2,3500000.0,7000000.0\n";

        let loaded = parse_ledger(csv.as_bytes(), Path::new("legacy.csv")).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].product_code, "SF001");
        assert_eq!(loaded[0].quantity, 2);
        assert_eq!(loaded[0].total, Money::from_major(7_000_000));
    }
}
