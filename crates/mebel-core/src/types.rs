//! # Domain Types
//!
//! Core domain types used throughout Mebel Inventory.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │  ProductRecord  │   │  TransactionRecord  │   │  CategoryEntry  │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  code (key)     │   │  transaction_id     │   │  key            │   │
//! │  │  name           │   │  timestamp          │   │  label          │   │
//! │  │  category_key ──┼───┼─────────────────────┼──►│                 │   │
//! │  │  unit_price     │   │  product_* (frozen) │   └─────────────────┘   │
//! │  │  stock_quantity │   │  quantity, total    │                         │
//! │  └─────────────────┘   └─────────────────────┘                         │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  ProductUpdate  │   │  UpdateOutcome  │                             │
//! │  │  (partial)      │   │  Updated        │                             │
//! │  │  name?          │   │  NoChanges      │                             │
//! │  │  unit_price?    │   │  NotFound       │                             │
//! │  │  stock?  ...    │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A product is identified by its `code` alone. Codes are stored uppercase
//! and trimmed; see [`normalize_code`](crate::validation::normalize_code).

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Unique product code, uppercase (e.g. "SF001").
    pub code: String,

    /// Display name.
    pub name: String,

    /// Key into the category table (e.g. "SOFA").
    pub category_key: String,

    /// Price per unit.
    pub unit_price: Money,

    /// Units on hand, never negative.
    pub stock_quantity: i64,
}

impl ProductRecord {
    /// Value of the stock on hand (unit price × stock), `None` on overflow.
    #[inline]
    pub fn stock_value(&self) -> Option<Money> {
        self.unit_price.checked_mul_quantity(self.stock_quantity)
    }

    /// Checks whether `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.stock_quantity
    }

    /// Merges every field present in `update` into this record.
    ///
    /// Returns `true` if the patch carried at least one field.
    pub(crate) fn apply(&mut self, update: &ProductUpdate) -> bool {
        if update.is_empty() {
            return false;
        }

        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(category_key) = &update.category_key {
            self.category_key = category_key.clone();
        }
        if let Some(unit_price) = update.unit_price {
            self.unit_price = unit_price;
        }
        if let Some(stock_quantity) = update.stock_quantity {
            self.stock_quantity = stock_quantity;
        }

        true
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Caller input for creating a product.
///
/// Unlike [`ProductRecord`], the code may arrive in any case and with
/// surrounding whitespace; it is normalized before insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub category_key: String,
    pub unit_price: Money,
    pub stock_quantity: i64,
}

// =============================================================================
// Partial Update
// =============================================================================

/// A partial-field patch for a product.
///
/// Only the fields that are `Some` change; everything else on the record
/// is left exactly as it was.
///
/// ## Example
/// ```rust
/// use mebel_core::ProductUpdate;
///
/// let patch = ProductUpdate::default().stock_quantity(3);
/// assert!(!patch.is_empty());
/// assert!(ProductUpdate::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category_key: Option<String>,
    pub unit_price: Option<Money>,
    pub stock_quantity: Option<i64>,
}

impl ProductUpdate {
    /// Sets a new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new category key.
    pub fn category_key(mut self, key: impl Into<String>) -> Self {
        self.category_key = Some(key.into());
        self
    }

    /// Sets a new unit price.
    pub fn unit_price(mut self, price: Money) -> Self {
        self.unit_price = Some(price);
        self
    }

    /// Sets a new stock quantity.
    pub fn stock_quantity(mut self, qty: i64) -> Self {
        self.stock_quantity = Some(qty);
        self
    }

    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category_key.is_none()
            && self.unit_price.is_none()
            && self.stock_quantity.is_none()
    }
}

/// Result of a keyed partial update.
///
/// An empty patch is a successful no-op, distinct from a missing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// The record exists and at least one field was written.
    Updated,
    /// The record exists but the patch was empty.
    NoChanges,
    /// No record has this code.
    NotFound,
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Caller-generated ID (e.g. "TRX20250101120000").
    pub transaction_id: String,
    /// Caller-generated timestamp, second precision.
    pub timestamp: String,
    pub product_code: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    /// Quantity sold, always positive.
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    /// quantity × unit_price.
    pub total: Money,
}

// =============================================================================
// Category
// =============================================================================

/// A category key and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub key: String,
    pub label: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
