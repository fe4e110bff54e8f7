//! # Storage Error Types
//!
//! Error types for catalog snapshot and ledger file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / csv::Error          CoreError (mebel-core)            │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  StorageError (this module) ← Adds file + operation context             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller decides: abort the user action, or keep going with the          │
//! │  in-memory state and warn that it was not durably saved                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these errors is fatal to the process. After a failed save the
//! in-memory store is still consistent, it just is not on disk yet.

use std::path::Path;

use mebel_core::{CoreError, ValidationError};
use thiserror::Error;

/// Persistence and store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A row in a persisted file could not be turned into a record.
    ///
    /// ## When This Occurs
    /// - Non-numeric or negative price / stock / quantity
    /// - Missing column or wrong field count
    /// - The same product code on two snapshot rows
    ///
    /// The whole load fails; no partial store is returned.
    #[error("Malformed record in {file} at line {line}: {reason}")]
    MalformedRecord {
        file: String,
        line: u64,
        reason: String,
    },

    /// A file could not be opened, written, synced, or renamed.
    ///
    /// ## When This Occurs
    /// - Permission denied
    /// - Disk full
    /// - Data directory missing and cannot be created
    #[error("Failed to {operation} {file}: {source}")]
    Io {
        file: String,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The CSV codec failed while writing, or hit an I/O error while reading.
    #[error("Failed to {operation} {file}: {source}")]
    Csv {
        file: String,
        operation: &'static str,
        #[source]
        source: csv::Error,
    },

    /// No usable data directory could be determined.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store or sale rule violation (duplicate code, insufficient stock, ...).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StorageError {
    /// Creates a MalformedRecord error.
    pub fn malformed(file: impl Into<String>, line: u64, reason: impl Into<String>) -> Self {
        StorageError::MalformedRecord {
            file: file.into(),
            line,
            reason: reason.into(),
        }
    }

    /// True when the error means a file read or write did not complete.
    ///
    /// If this is returned from a mutation, the in-memory change happened
    /// but was not durably committed.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, StorageError::Io { .. } | StorageError::Csv { .. })
    }
}

impl From<ValidationError> for StorageError {
    fn from(err: ValidationError) -> Self {
        StorageError::Core(CoreError::Validation(err))
    }
}

/// Builds a `map_err` adapter that wraps an `io::Error` with file context.
pub(crate) fn io_error(
    path: &Path,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> StorageError {
    let file = path.display().to_string();
    move |source| StorageError::Io {
        file,
        operation,
        source,
    }
}

/// Builds a `map_err` adapter that wraps a `csv::Error` with file context.
pub(crate) fn csv_error(
    path: &Path,
    operation: &'static str,
) -> impl FnOnce(csv::Error) -> StorageError {
    let file = path.display().to_string();
    move |source| StorageError::Csv {
        file,
        operation,
        source,
    }
}

/// Classifies a csv read error: I/O stays I/O, everything else is a bad row.
pub(crate) fn read_failure(path: &Path, err: csv::Error) -> StorageError {
    if err.is_io_error() {
        return csv_error(path, "read")(err);
    }

    let line = err.position().map_or(0, |pos| pos.line());
    StorageError::malformed(path.display().to_string(), line, err.to_string())
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Unit Tests
// =============================================================================
