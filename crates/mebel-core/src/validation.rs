//! # Validation Module
//!
//! Input validation utilities for Mebel Inventory.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (command line, menu)                                  │
//! │  ├── Parses text into numbers / Money                                  │
//! │  └── Reports problems to the user                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── normalize_code: trim + uppercase                                  │
//! │  └── Field rules (format, range, known category)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ProductStore                                                 │
//! │  └── Code uniqueness (DuplicateKey)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mebel_core::validation::{normalize_code, validate_product_code, validate_quantity};
//!
//! let code = normalize_code("  sf001 ");
//! assert_eq!(code, "SF001");
//! validate_product_code(&code).unwrap();
//! validate_quantity(2).unwrap();
//! ```

use crate::category::CategoryTable;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewProduct, ProductRecord, ProductUpdate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a product code.
pub const MAX_CODE_LEN: usize = 20;

/// Maximum length of a product name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Normalization
// =============================================================================

/// Normalizes a product code: trims whitespace and uppercases.
///
/// Every lookup and insert must go through this so that `sf001` and
/// `SF001 ` refer to the same record.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a normalized product code.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_CODE_LEN`] characters
/// - Only letters, digits, hyphens and underscores
///
/// ## Example
/// ```rust
/// use mebel_core::validation::validate_product_code;
///
/// assert!(validate_product_code("SF001").is_ok());
/// assert!(validate_product_code("").is_err());
/// assert!(validate_product_code("SF 001").is_err());
/// ```
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates that `key` is one of the table's categories.
pub fn validate_category_key(key: &str, categories: &CategoryTable) -> ValidationResult<()> {
    if categories.contains(key) {
        return Ok(());
    }

    Err(ValidationError::UnknownCategory {
        key: key.to_string(),
        allowed: categories.all_keys().into_iter().map(str::to_string).collect(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// Stock availability is checked separately, against the live record.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock_quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Normalizes and validates caller input for a new product.
///
/// ## Returns
/// The record ready for `ProductStore::append`, with its code normalized
/// and its name trimmed.
pub fn validate_new_product(
    input: NewProduct,
    categories: &CategoryTable,
) -> ValidationResult<ProductRecord> {
    let code = normalize_code(&input.code);
    validate_product_code(&code)?;
    validate_product_name(&input.name)?;
    validate_category_key(&input.category_key, categories)?;
    validate_price(input.unit_price)?;
    validate_stock(input.stock_quantity)?;

    Ok(ProductRecord {
        code,
        name: input.name.trim().to_string(),
        category_key: input.category_key,
        unit_price: input.unit_price,
        stock_quantity: input.stock_quantity,
    })
}

/// Validates every field present in a partial update.
///
/// Absent fields are not checked; an empty patch is valid.
pub fn validate_product_update(
    update: &ProductUpdate,
    categories: &CategoryTable,
) -> ValidationResult<()> {
    if let Some(name) = &update.name {
        validate_product_name(name)?;
    }
    if let Some(key) = &update.category_key {
        validate_category_key(key, categories)?;
    }
    if let Some(price) = update.unit_price {
        validate_price(price)?;
    }
    if let Some(stock) = update.stock_quantity {
        validate_stock(stock)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
