//! Row models for the product catalog.

use serde::Serialize;

use crate::domain::product::{Product, StockChange};
use crate::domain::status::PillCategory;
use crate::dto::format::format_currency;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: i64,
    pub status_label: &'static str,
    pub pill: PillCategory,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        let stock = product.total_stock();
        let (status_label, pill) = match (product.active, stock > 0) {
            (false, _) => ("Inactivo", PillCategory::Cancelled),
            (true, true) => ("Activo", PillCategory::Done),
            (true, false) => ("Sin stock", PillCategory::Warning),
        };

        Self {
            id: product.id.get(),
            code: product.code,
            name: product.name,
            category: product
                .category_name
                .unwrap_or_else(|| "Sin categoría".to_string()),
            price: format_currency(product.price),
            stock,
            status_label,
            pill,
        }
    }
}

/// Line of the stock audit trail shown before confirming an update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StockChangeRow {
    pub variant: String,
    pub previous: i64,
    pub current: i64,
    /// Signed delta, e.g. `+3` or `-2`.
    pub delta: String,
}

impl From<StockChange> for StockChangeRow {
    fn from(change: StockChange) -> Self {
        let delta = format!("{:+}", change.delta());
        Self {
            variant: change.variant,
            previous: change.previous,
            current: change.current,
            delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::product::StockLevel;
    use crate::domain::types::ProductId;

    fn product(active: bool, stock: Vec<StockLevel>) -> Product {
        Product {
            id: ProductId::new(1).unwrap(),
            code: "YER-500".into(),
            name: "Yerba 500g".into(),
            category_id: None,
            category_name: None,
            price: dec!(1234.5),
            active,
            stock,
        }
    }

    #[test]
    fn active_product_with_stock() {
        let row = ProductRow::from(product(true, vec![StockLevel::new("Única", 4)]));

        assert_eq!(row.price, "$1.234,50");
        assert_eq!(row.category, "Sin categoría");
        assert_eq!((row.status_label, row.pill), ("Activo", PillCategory::Done));
    }

    #[test]
    fn stock_state_drives_pill() {
        let empty = ProductRow::from(product(true, vec![]));
        assert_eq!(empty.pill, PillCategory::Warning);

        let inactive = ProductRow::from(product(false, vec![StockLevel::new("Única", 4)]));
        assert_eq!(inactive.status_label, "Inactivo");
    }

    #[test]
    fn overflowing_stock_still_projects() {
        let row = ProductRow::from(product(
            true,
            vec![StockLevel::new("A", i32::MAX), StockLevel::new("B", 1)],
        ));
        assert_eq!(row.stock, 2_147_483_648);
        assert_eq!(row.pill, PillCategory::Done);
    }

    #[test]
    fn change_rows_show_signed_delta() {
        let row = StockChangeRow::from(StockChange {
            variant: "M".into(),
            previous: 4,
            current: 7,
        });
        assert_eq!(row.delta, "+3");
    }
}
