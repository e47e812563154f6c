use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::Category;

/// Product template returned by a barcode lookup, used to pre-fill a new
/// reminder. `shelf_life_days` is turned into a suggested expiry date
/// relative to the lookup instant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProductTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub shelf_life_days: i64,
}

// Stand-in for an external product API.
static CATALOG: Lazy<HashMap<&'static str, ProductTemplate>> = Lazy::new(|| {
    HashMap::from([
        (
            "4011200296908",
            ProductTemplate {
                title: "Whole Milk 1L",
                description: "Pasteurized whole milk, keep refrigerated",
                category: Category::Food,
                shelf_life_days: 7,
            },
        ),
        (
            "5000112637922",
            ProductTemplate {
                title: "Cheddar Cheese 200g",
                description: "Mature cheddar block",
                category: Category::Food,
                shelf_life_days: 21,
            },
        ),
        (
            "8712345678906",
            ProductTemplate {
                title: "Free Range Eggs (12)",
                description: "Large free range eggs",
                category: Category::Food,
                shelf_life_days: 14,
            },
        ),
        (
            "3574660239881",
            ProductTemplate {
                title: "Ibuprofen 200mg",
                description: "Pack of 24 tablets",
                category: Category::Medicine,
                shelf_life_days: 365,
            },
        ),
        (
            "7310865004703",
            ProductTemplate {
                title: "Saline Nasal Spray",
                description: "Use within 90 days of opening",
                category: Category::Medicine,
                shelf_life_days: 90,
            },
        ),
        (
            "9780201379624",
            ProductTemplate {
                title: "Parking Permit",
                description: "Annual residential parking permit",
                category: Category::Document,
                shelf_life_days: 365,
            },
        ),
    ])
});

pub fn lookup(barcode: &str) -> Option<ProductTemplate> {
    CATALOG.get(barcode).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_barcode_returns_template() {
        let product = lookup("4011200296908").unwrap();
        assert_eq!(product.title, "Whole Milk 1L");
        assert_eq!(product.category, Category::Food);
        assert_eq!(product.shelf_life_days, 7);
    }

    #[test]
    fn unknown_barcode_returns_none() {
        assert!(lookup("0000000000000").is_none());
    }
}
