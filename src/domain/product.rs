use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, ProductCode, ProductId, ProductName};
use crate::search::request::{FilterMap, SearchFilters, Selection};

/// Stock held for one variant (size, colour, presentation) of a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub variant: String,
    pub quantity: i32,
}

impl StockLevel {
    pub fn new(variant: impl Into<String>, quantity: i32) -> Self {
        Self {
            variant: variant.into(),
            quantity,
        }
    }
}

/// Product as returned by `POST /products/search` and `GET /products/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub stock: Vec<StockLevel>,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// Sum of every variant. Widened so large backend quantities cannot overflow.
    pub fn total_stock(&self) -> i64 {
        self.stock.iter().map(|level| i64::from(level.quantity)).sum()
    }
}

/// Body of `POST /products`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub code: ProductCode,
    pub name: ProductName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: Vec<StockLevel>,
}

/// One line of the stock audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockChange {
    pub variant: String,
    pub previous: i64,
    pub current: i64,
}

impl StockChange {
    pub fn delta(&self) -> i64 {
        self.current - self.previous
    }
}

/// Compares two stock snapshots.
///
/// Variants missing on one side count as zero. Unchanged variants are left
/// out and the result is ordered by variant name.
pub fn diff_stock(before: &[StockLevel], after: &[StockLevel]) -> Vec<StockChange> {
    let mut merged: BTreeMap<&str, (i64, i64)> = BTreeMap::new();

    for level in before {
        merged.entry(level.variant.as_str()).or_default().0 += i64::from(level.quantity);
    }
    for level in after {
        merged.entry(level.variant.as_str()).or_default().1 += i64::from(level.quantity);
    }

    merged
        .into_iter()
        .filter(|(_, (previous, current))| previous != current)
        .map(|(variant, (previous, current))| StockChange {
            variant: variant.to_string(),
            previous,
            current,
        })
        .collect()
}

/// Body of `PATCH /products/{id}` when stock is edited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdate {
    pub stock: Vec<StockLevel>,
    pub changes: Vec<StockChange>,
}

impl StockUpdate {
    pub fn new(before: &[StockLevel], after: Vec<StockLevel>) -> Self {
        let changes = diff_stock(before, &after);
        Self {
            stock: after,
            changes,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub category: Selection<CategoryId>,
    pub active: Option<bool>,
    pub in_stock: Option<bool>,
}

impl SearchFilters for ProductFilters {
    fn write_filters(&self, filters: &mut FilterMap) {
        filters
            .selection("categoryId", self.category)
            .flag("active", self.active)
            .flag("inStock", self.in_stock);
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn diff_reports_added_removed_and_changed_variants() {
        let before = vec![
            StockLevel::new("M", 4),
            StockLevel::new("L", 2),
            StockLevel::new("S", 1),
        ];
        let after = vec![
            StockLevel::new("S", 1),
            StockLevel::new("M", 7),
            StockLevel::new("XL", 3),
        ];

        let changes = diff_stock(&before, &after);

        assert_eq!(
            changes,
            vec![
                StockChange {
                    variant: "L".into(),
                    previous: 2,
                    current: 0
                },
                StockChange {
                    variant: "M".into(),
                    previous: 4,
                    current: 7
                },
                StockChange {
                    variant: "XL".into(),
                    previous: 0,
                    current: 3
                },
            ]
        );
        assert_eq!(changes[0].delta(), -2);
    }

    #[test]
    fn large_quantities_do_not_overflow() {
        let product = Product {
            id: ProductId::new(1).unwrap(),
            code: "YER-500".into(),
            name: "Yerba 500g".into(),
            category_id: None,
            category_name: None,
            price: Decimal::ZERO,
            active: true,
            stock: vec![StockLevel::new("A", i32::MAX), StockLevel::new("B", 1)],
        };
        assert_eq!(product.total_stock(), i64::from(i32::MAX) + 1);

        let changes = diff_stock(
            &[StockLevel::new("A", i32::MIN)],
            &[StockLevel::new("A", i32::MAX), StockLevel::new("A", i32::MAX)],
        );
        assert_eq!(changes[0].delta(), 2 * i64::from(i32::MAX) - i64::from(i32::MIN));
    }

    #[test]
    fn identical_snapshots_produce_no_changes() {
        let stock = vec![StockLevel::new("Única", 10)];
        assert!(StockUpdate::new(&stock, stock.clone()).is_noop());
    }

    #[test]
    fn filters_follow_selection_contract() {
        let filters = ProductFilters {
            category: Selection::Unassigned,
            active: Some(true),
            in_stock: None,
        };
        let mut map = FilterMap::new();
        filters.write_filters(&mut map);

        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({"categoryId": null, "active": true})
        );
    }

    #[test]
    fn new_product_sends_price_as_number() {
        let product = NewProduct {
            code: ProductCode::new("YER-500").unwrap(),
            name: ProductName::new("Yerba 500g").unwrap(),
            category_id: None,
            price: dec!(1234.5),
            stock: vec![],
        };

        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"code": "YER-500", "name": "Yerba 500g", "price": 1234.5, "stock": []})
        );
    }

    #[test]
    fn product_defaults_missing_fields() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "code": "YER-500",
            "name": "Yerba 500g",
            "price": 1234.5
        }))
        .unwrap();

        assert!(product.active);
        assert_eq!(product.price, "1234.5".parse::<Decimal>().unwrap());
        assert_eq!(product.total_stock(), 0);
        assert_eq!(product.category_id, None);
    }
}
