//! # Seed Catalog
//!
//! The sample products written when no catalog snapshot exists yet.
//!
//! ## Seeded Products
//! One product per default category:
//! - SOFA: Sofa Minimalis 3 Seater
//! - MEJA: Meja Makan Kayu Jati
//! - LEMARI: Lemari Pakaian 3 Pintu
//! - TEMPAT_TIDUR: Tempat Tidur King Size
//! - DEKORASI: Vas Bunga Keramik

use mebel_core::{CoreResult, Money, ProductRecord, ProductStore};

/// Sample products: (code, name, category, price in whole units, stock).
const SEED_PRODUCTS: &[(&str, &str, &str, i64, i64)] = &[
    ("SF001", "Sofa Minimalis 3 Seater", "SOFA", 3_500_000, 5),
    ("MJ001", "Meja Makan Kayu Jati", "MEJA", 2_500_000, 3),
    ("LM001", "Lemari Pakaian 3 Pintu", "LEMARI", 4_000_000, 2),
    ("TT001", "Tempat Tidur King Size", "TEMPAT_TIDUR", 5_000_000, 4),
    ("DK001", "Vas Bunga Keramik", "DEKORASI", 250_000, 10),
];

/// Returns the seed products in catalog order.
pub fn seed_products() -> Vec<ProductRecord> {
    SEED_PRODUCTS
        .iter()
        .map(|&(code, name, category_key, price, stock)| ProductRecord {
            code: code.to_string(),
            name: name.to_string(),
            category_key: category_key.to_string(),
            unit_price: Money::from_major(price),
            stock_quantity: stock,
        })
        .collect()
}

/// Builds a store holding the seed products.
pub fn seed_store() -> CoreResult<ProductStore> {
    ProductStore::from_records(seed_products())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mebel_core::CategoryTable;

    #[test]
    fn test_seed_store_order() {
        let store = seed_store().unwrap();
        let codes: Vec<_> = store.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["SF001", "MJ001", "LM001", "TT001", "DK001"]);
    }

    #[test]
    fn test_seed_categories_are_known() {
        let categories = CategoryTable::furniture();
        assert!(seed_products()
            .iter()
            .all(|p| categories.contains(&p.category_key)));
    }

    #[test]
    fn test_seed_sofa() {
        let store = seed_store().unwrap();
        let sofa = store.search("SF001").unwrap();
        assert_eq!(sofa.unit_price, Money::from_major(3_500_000));
        assert_eq!(sofa.stock_quantity, 5);
    }
}
