//! # mebel-core: Pure Inventory Logic for Mebel Inventory
//!
//! This crate holds the in-memory record store, the sales ledger queue and
//! the category table, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Mebel Inventory Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Caller (inventory binary, menus)                  │   │
//! │  │    list ──► add ──► update ──► delete ──► sell ──► report       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              mebel-storage (Inventory handle)                   │   │
//! │  │        snapshot on every mutation, append on every sale         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mebel-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐ ┌─────────────┐ ┌──────────┐ ┌────────────┐  │   │
//! │  │  │ ProductStore │ │ Transaction │ │ Category │ │   Money    │  │   │
//! │  │  │ Vec + index  │ │ Ledger FIFO │ │  Table   │ │  cents     │  │   │
//! │  │  └──────────────┘ └─────────────┘ └──────────┘ └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductRecord, TransactionRecord, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`product_store`] - Ordered product collection keyed by code
//! - [`ledger`] - FIFO transaction queue
//! - [`category`] - Category key → label table
//! - [`sale`] - Sale checks and record construction
//! - [`report`] - Inventory and ledger summaries
//! - [`validation`] - Input normalization and field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use mebel_core::{Money, ProductRecord, ProductStore, ProductUpdate, UpdateOutcome};
//!
//! let mut store = ProductStore::new();
//! store.append(ProductRecord {
//!     code: "SF001".to_string(),
//!     name: "Sofa".to_string(),
//!     category_key: "SOFA".to_string(),
//!     unit_price: Money::from_major(3_500_000),
//!     stock_quantity: 5,
//! }).unwrap();
//!
//! let outcome = store.update("SF001", &ProductUpdate::default().stock_quantity(3));
//! assert_eq!(outcome, UpdateOutcome::Updated);
//! assert_eq!(store.search("SF001").unwrap().stock_quantity, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod error;
pub mod ledger;
pub mod money;
pub mod product_store;
pub mod report;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use category::CategoryTable;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::TransactionLedger;
pub use money::Money;
pub use product_store::ProductStore;
pub use report::{InventoryReport, LedgerSummary};
pub use sale::{prepare_sale, PreparedSale};
pub use types::*;
