//! # Sale Preparation
//!
//! Pure checks and record construction for a single-product sale.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sale Flow                                       │
//! │                                                                         │
//! │  prepare_sale(store, "SF001", 2, id, ts) ← THIS MODULE (no mutation)   │
//! │       │                                                                 │
//! │       ├── qty <= 0?        → ValidationError::MustBePositive            │
//! │       ├── unknown code?    → CoreError::ProductNotFound                 │
//! │       ├── qty > stock?     → CoreError::InsufficientStock               │
//! │       ├── total overflows? → CoreError::AmountOverflow                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PreparedSale { record, remaining_stock }                               │
//! │       │                                                                 │
//! │       ▼  (mebel-storage Inventory)                                      │
//! │  1. append record to ledger file                                        │
//! │  2. enqueue into TransactionLedger                                      │
//! │  3. set_stock(code, remaining_stock)                                    │
//! │  4. save catalog snapshot                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejection happens before step 1, so a rejected sale leaves both
//! the store and the ledger exactly as they were.

use crate::error::{CoreError, CoreResult};
use crate::product_store::ProductStore;
use crate::types::TransactionRecord;
use crate::validation::validate_quantity;

/// A sale that passed every check and is ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSale {
    /// The ledger row to append (name and price frozen from the product).
    pub record: TransactionRecord,
    /// Stock left on the product once the sale is committed.
    pub remaining_stock: i64,
}

/// Validates a sale against the current store and builds its record.
///
/// `transaction_id` and `timestamp` are opaque caller-generated strings.
pub fn prepare_sale(
    store: &ProductStore,
    code: &str,
    quantity: i64,
    transaction_id: impl Into<String>,
    timestamp: impl Into<String>,
) -> CoreResult<PreparedSale> {
    validate_quantity(quantity)?;

    let product = store
        .search(code)
        .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))?;

    if !product.can_sell(quantity) {
        return Err(CoreError::InsufficientStock {
            code: product.code.clone(),
            available: product.stock_quantity,
            requested: quantity,
        });
    }

    let total = product
        .unit_price
        .checked_mul_quantity(quantity)
        .ok_or_else(|| CoreError::overflow(format!("sale total for {}", product.code)))?;

    let record = TransactionRecord {
        transaction_id: transaction_id.into(),
        timestamp: timestamp.into(),
        product_code: product.code.clone(),
        product_name: product.name.clone(),
        quantity,
        unit_price: product.unit_price,
        total,
    };

    Ok(PreparedSale {
        record,
        remaining_stock: product.stock_quantity - quantity,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;
    use crate::types::ProductRecord;

    fn store() -> ProductStore {
        ProductStore::from_records(vec![ProductRecord {
            code: "SF001".to_string(),
            name: "Sofa Minimalis 3 Seater".to_string(),
            category_key: "SOFA".to_string(),
            unit_price: Money::from_major(3_500_000),
            stock_quantity: 5,
        }])
        .unwrap()
    }

    #[test]
    fn test_prepare_sale_builds_snapshot_record() {
        let sale = prepare_sale(&store(), "SF001", 2, "TRX1", "2025-01-01 10:00:00").unwrap();

        assert_eq!(sale.remaining_stock, 3);
        assert_eq!(sale.record.product_name, "Sofa Minimalis 3 Seater");
        assert_eq!(sale.record.unit_price, Money::from_major(3_500_000));
        assert_eq!(sale.record.total, Money::from_major(7_000_000));
        assert_eq!(sale.record.quantity, 2);
    }

    #[test]
    fn test_selling_entire_stock_is_allowed() {
        let sale = prepare_sale(&store(), "SF001", 5, "TRX1", "t").unwrap();
        assert_eq!(sale.remaining_stock, 0);
    }

    #[test]
    fn test_rejects_quantity_above_stock() {
        let err = prepare_sale(&store(), "SF001", 6, "TRX1", "t").unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                code: "SF001".to_string(),
                available: 5,
                requested: 6,
            }
        );
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let err = prepare_sale(&store(), "SF001", 0, "TRX1", "t").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_code() {
        let err = prepare_sale(&store(), "XX999", 1, "TRX1", "t").unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound("XX999".to_string()));
    }

    #[test]
    fn test_rejects_total_that_overflows() {
        let store = ProductStore::from_records(vec![ProductRecord {
            code: "BIG1".to_string(),
            name: "Grand Piano Cabinet".to_string(),
            category_key: "LEMARI".to_string(),
            unit_price: Money::from_cents(i64::MAX),
            stock_quantity: 2,
        }])
        .unwrap();

        let err = prepare_sale(&store, "BIG1", 2, "TRX1", "t").unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));

        let sale = prepare_sale(&store, "BIG1", 1, "TRX1", "t").unwrap();
        assert_eq!(sale.record.total, Money::from_cents(i64::MAX));
    }
}
