//! # Inventory Report
//!
//! Pure summary calculations over the product store and the ledger.
//! Rendering is left to the caller; everything here is `Serialize` so the
//! command line can print it as a table or as JSON.

use serde::Serialize;

use crate::category::CategoryTable;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ProductRecord, TransactionRecord};

/// Products with stock strictly below this are flagged as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Stock totals for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category_key: String,
    /// Label from the category table, or the key itself if unknown.
    pub label: String,
    /// Units on hand across the category.
    pub units: i64,
    /// Σ price × stock across the category.
    pub value: Money,
}

/// Snapshot summary of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    pub total_products: usize,
    pub total_value: Money,
    pub low_stock_threshold: i64,
    pub low_stock: Vec<ProductRecord>,
    /// One entry per category, in order of first appearance in the store.
    pub by_category: Vec<CategorySummary>,
}

impl InventoryReport {
    /// Builds the report from products in store order.
    ///
    /// ## Returns
    /// * `Err(CoreError::AmountOverflow)` - a value or unit total does not fit
    pub fn build<'a>(
        products: impl IntoIterator<Item = &'a ProductRecord>,
        categories: &CategoryTable,
        low_stock_threshold: i64,
    ) -> CoreResult<Self> {
        let mut total_products = 0;
        let mut total_value = Money::zero();
        let mut low_stock = Vec::new();
        let mut by_category: Vec<CategorySummary> = Vec::new();

        for product in products {
            total_products += 1;
            let value = product
                .stock_value()
                .ok_or_else(|| CoreError::overflow(format!("stock value of {}", product.code)))?;
            total_value = total_value
                .checked_add(value)
                .ok_or_else(|| CoreError::overflow("total inventory value"))?;

            if product.stock_quantity < low_stock_threshold {
                low_stock.push(product.clone());
            }

            match by_category
                .iter()
                .position(|s| s.category_key == product.category_key)
            {
                Some(pos) => {
                    let summary = &mut by_category[pos];
                    match (
                        summary.units.checked_add(product.stock_quantity),
                        summary.value.checked_add(value),
                    ) {
                        (Some(units), Some(value)) => {
                            summary.units = units;
                            summary.value = value;
                        }
                        _ => {
                            return Err(CoreError::overflow(format!(
                                "{} totals",
                                summary.category_key
                            )))
                        }
                    }
                }
                None => by_category.push(CategorySummary {
                    category_key: product.category_key.clone(),
                    label: categories.label_or_key(&product.category_key).to_string(),
                    units: product.stock_quantity,
                    value,
                }),
            }
        }

        Ok(InventoryReport {
            total_products,
            total_value,
            low_stock_threshold,
            low_stock,
            by_category,
        })
    }
}

/// Summary of the transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub transaction_count: usize,
    pub units_sold: i64,
    pub total_revenue: Money,
}

impl LedgerSummary {
    /// Builds the summary from transactions in ledger order.
    pub fn build<'a>(
        transactions: impl IntoIterator<Item = &'a TransactionRecord>,
    ) -> CoreResult<Self> {
        let mut summary = LedgerSummary {
            transaction_count: 0,
            units_sold: 0,
            total_revenue: Money::zero(),
        };

        for t in transactions {
            summary.transaction_count += 1;
            summary.units_sold = summary
                .units_sold
                .checked_add(t.quantity)
                .ok_or_else(|| CoreError::overflow("units sold"))?;
            summary.total_revenue = summary
                .total_revenue
                .checked_add(t.total)
                .ok_or_else(|| CoreError::overflow("total revenue"))?;
        }

        Ok(summary)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
