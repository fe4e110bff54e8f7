//! # mebel-storage: File Persistence for Mebel Inventory
//!
//! This crate keeps the furniture catalog and the sales ledger on disk as
//! two CSV files and exposes the [`Inventory`] handle that keeps them in
//! step with the in-memory stores from `mebel-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mebel Inventory Data Flow                          │
//! │                                                                         │
//! │  inventory binary (sell SF001 2)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 mebel-storage (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Inventory   │    │    Gateway    │    │    Codecs    │  │   │
//! │  │   │(inventory.rs) │───►│ (gateway.rs)  │───►│ catalog.rs   │  │   │
//! │  │   │               │    │               │    │ ledger_file  │  │   │
//! │  │   │ store+ledger  │    │ two paths     │    │ .rs          │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   ~/.local/share/mebel-inventory/                               │   │
//! │  │     furniture_inventory.csv   (snapshot, replaced on save)      │   │
//! │  │     transactions.csv          (append-only)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Data directory and file names
//! - [`gateway`] - Routes loads and saves to the codecs
//! - [`catalog`] - Catalog snapshot CSV codec
//! - [`ledger_file`] - Append-only ledger CSV codec
//! - [`inventory`] - The owned handle callers use
//! - [`seed`] - Sample products for a fresh data directory
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mebel_storage::{Inventory, StorageConfig};
//!
//! let mut inventory = Inventory::open(StorageConfig::new("./data"))?;
//!
//! let txn = inventory.sell("SF001", 2)?;
//! let report = inventory.report(inventory.config().low_stock_threshold)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod inventory;
pub mod ledger_file;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use gateway::PersistenceGateway;
pub use inventory::Inventory;
