//! # Category Table
//!
//! Fixed mapping from a short category key to its display label.
//!
//! The table is filled once at startup and only read afterwards. Keys are
//! kept in a `BTreeMap`, so [`CategoryTable::all_keys`] is always sorted
//! and presentation order does not depend on hashing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::CategoryEntry;

/// Default furniture categories (key, label).
pub const FURNITURE_CATEGORIES: &[(&str, &str)] = &[
    ("SOFA", "Sofa dan Kursi"),
    ("MEJA", "Meja dan Kursi Makan"),
    ("LEMARI", "Lemari dan Penyimpanan"),
    ("TEMPAT_TIDUR", "Tempat Tidur dan Kasur"),
    ("DEKORASI", "Dekorasi dan Aksesoris"),
];

/// Key → label lookup for product categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    entries: BTreeMap<String, String>,
}

impl CategoryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        CategoryTable::default()
    }

    /// Creates the table holding [`FURNITURE_CATEGORIES`].
    pub fn furniture() -> Self {
        let mut table = CategoryTable::new();
        for (key, label) in FURNITURE_CATEGORIES {
            table.put(*key, *label);
        }
        table
    }

    /// Inserts a category, overwriting the label if the key exists.
    pub fn put(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.entries.insert(key.into(), label.into());
    }

    /// Returns the label for `key`, if known.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the label for `key`, or the key itself when unknown.
    ///
    /// Used for rendering rows whose category was not validated (e.g. a
    /// hand-edited snapshot). The key is shown verbatim, never replaced.
    pub fn label_or_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Checks whether `key` is a known category.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All known keys, sorted.
    pub fn all_keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> Vec<CategoryEntry> {
        self.entries
            .iter()
            .map(|(key, label)| CategoryEntry {
                key: key.clone(),
                label: label.clone(),
            })
            .collect()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no category is defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_furniture_defaults() {
        let table = CategoryTable::furniture();
        assert_eq!(table.len(), 5);
        assert_eq!(table.get("SOFA"), Some("Sofa dan Kursi"));
        assert_eq!(table.get("TEMPAT_TIDUR"), Some("Tempat Tidur dan Kasur"));
        assert_eq!(table.get("KASUR"), None);
    }

    #[test]
    fn test_put_overwrites() {
        let mut table = CategoryTable::new();
        table.put("SOFA", "Sofa");
        table.put("SOFA", "Sofa dan Kursi");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("SOFA"), Some("Sofa dan Kursi"));
    }

    #[test]
    fn test_all_keys_sorted() {
        let table = CategoryTable::furniture();
        assert_eq!(
            table.all_keys(),
            vec!["DEKORASI", "LEMARI", "MEJA", "SOFA", "TEMPAT_TIDUR"]
        );
    }

    #[test]
    fn test_label_or_key_keeps_unknown_key() {
        let table = CategoryTable::furniture();
        assert_eq!(table.label_or_key("MEJA"), "Meja dan Kursi Makan");
        assert_eq!(table.label_or_key("GARDEN"), "GARDEN");
    }
}
