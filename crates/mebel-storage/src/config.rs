//! # Storage Configuration
//!
//! Where the catalog snapshot and the ledger file live.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Explicit builder calls (`StorageConfig::new(dir).catalog_file(..)`)
//! 2. Environment variables (`MEBEL_*`, see [`StorageConfig::from_env`])
//! 3. Platform data directory
//!    - **Linux**: `~/.local/share/mebel-inventory/`
//!    - **macOS**: `~/Library/Application Support/com.mebel.inventory/`
//!    - **Windows**: `%APPDATA%\mebel\inventory\data\`
//!
//! ## Example
//! ```rust,ignore
//! let config = StorageConfig::new("./data")
//!     .catalog_file("catalog.csv")
//!     .low_stock_threshold(3);
//! ```

use std::path::PathBuf;

use directories::ProjectDirs;
use mebel_core::report::DEFAULT_LOW_STOCK_THRESHOLD;

use crate::error::{StorageError, StorageResult};

/// Default catalog snapshot file name.
pub const DEFAULT_CATALOG_FILE: &str = "furniture_inventory.csv";

/// Default ledger file name.
pub const DEFAULT_LEDGER_FILE: &str = "transactions.csv";

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding both files. Created on first write.
    pub data_dir: PathBuf,

    /// Catalog snapshot file name, relative to `data_dir`.
    /// Default: `furniture_inventory.csv`
    pub catalog_file: String,

    /// Ledger file name, relative to `data_dir`.
    /// Default: `transactions.csv`
    pub ledger_file: String,

    /// Stock level below which the report flags a product.
    /// Default: 5
    pub low_stock_threshold: i64,
}

impl StorageConfig {
    /// Creates a configuration rooted at `data_dir` with default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: data_dir.into(),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            ledger_file: DEFAULT_LEDGER_FILE.to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    /// Sets the catalog snapshot file name.
    pub fn catalog_file(mut self, name: impl Into<String>) -> Self {
        self.catalog_file = name.into();
        self
    }

    /// Sets the ledger file name.
    pub fn ledger_file(mut self, name: impl Into<String>) -> Self {
        self.ledger_file = name.into();
        self
    }

    /// Sets the low-stock threshold.
    pub fn low_stock_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// Full path of the catalog snapshot.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    /// Full path of the ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }

    /// Builds a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MEBEL_DATA_DIR`: Data directory (default: platform data directory)
    /// - `MEBEL_CATALOG_FILE`: Catalog snapshot file name
    /// - `MEBEL_LEDGER_FILE`: Ledger file name
    /// - `MEBEL_LOW_STOCK`: Low-stock threshold (ignored if not an integer)
    pub fn from_env() -> StorageResult<Self> {
        let data_dir = match std::env::var("MEBEL_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir().ok_or_else(|| {
                StorageError::Config(
                    "could not determine a data directory; set MEBEL_DATA_DIR".to_string(),
                )
            })?,
        };

        let mut config = StorageConfig::new(data_dir);

        if let Ok(name) = std::env::var("MEBEL_CATALOG_FILE") {
            config.catalog_file = name;
        }

        if let Ok(name) = std::env::var("MEBEL_LEDGER_FILE") {
            config.ledger_file = name;
        }

        if let Ok(threshold) = std::env::var("MEBEL_LOW_STOCK") {
            if let Ok(threshold) = threshold.trim().parse::<i64>() {
                config.low_stock_threshold = threshold;
            }
        }

        Ok(config)
    }
}

/// Platform-specific application data directory, if the OS reports one.
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "mebel", "inventory").map(|dirs| dirs.data_dir().to_path_buf())
}

// =============================================================================
// Unit Tests
// =============================================================================
