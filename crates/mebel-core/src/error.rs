//! # Error Types
//!
//! Domain-specific error types for mebel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mebel-core errors (this file)                                         │
//! │  ├── CoreError        - Store and sale rule violations                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mebel-storage errors (separate crate)                                 │
//! │  └── StorageError     - Snapshot / ledger file failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StorageError → caller message     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! A keyed update or delete that finds no record is an expected outcome,
//! returned as [`UpdateOutcome::NotFound`](crate::UpdateOutcome) or `false`.
//! Only operations whose contract is "this must succeed" return `Err`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent store invariant violations or sale rule failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A product with this code is already in the store.
    ///
    /// ## When This Occurs
    /// - `ProductStore::append` with a code that is already present
    /// - A catalog snapshot containing the same code twice
    #[error("Product code already exists: {code}")]
    DuplicateKey { code: String },

    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - A sale references a code that is not in the store
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Insufficient stock to complete sale.
    ///
    /// ## User Workflow
    /// ```text
    /// sell SF001 7
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { code: "SF001", available: 5, requested: 7 }
    ///      │
    ///      ▼
    /// Store and ledger untouched
    /// ```
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// A money amount does not fit in the cent range.
    ///
    /// ## When This Occurs
    /// - `quantity × unit_price` of a sale exceeds the representable total
    /// - Stock value or revenue totals of a report exceed it
    ///
    /// Nothing is mutated or written when this is returned.
    #[error("Amount overflow while computing {what}")]
    AmountOverflow { what: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a DuplicateKey error for a product code.
    pub fn duplicate(code: impl Into<String>) -> Self {
        CoreError::DuplicateKey { code: code.into() }
    }

    /// Creates an AmountOverflow error.
    pub fn overflow(what: impl Into<String>) -> Self {
        CoreError::AmountOverflow { what: what.into() }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied values don't meet requirements.
/// Used for early validation before any store mutation runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a price that is not a decimal number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Category key is not present in the category table.
    #[error("Unknown category '{key}', expected one of: {allowed:?}")]
    UnknownCategory { key: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            code: "SF001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for SF001: available 3, requested 5"
        );

        let err = CoreError::duplicate("MJ001");
        assert_eq!(err.to_string(), "Product code already exists: MJ001");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
