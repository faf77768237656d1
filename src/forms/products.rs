use std::collections::HashSet;

use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, StockLevel};
use crate::domain::types::{CategoryId, ProductCode, ProductId, ProductName};
use crate::forms::{FormError, parse_amount};
use crate::search::request::Selection;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for creating a catalog product.
pub struct AddProductForm {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Raw selector value; `-1` and `-2` mean no category.
    #[serde(default = "no_category")]
    pub category_id: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub variant: Vec<String>,
    #[serde(default)]
    pub quantity: Vec<i32>,
}

fn no_category() -> i32 {
    crate::search::request::SELECTION_ANY
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Stock editor submission: parallel variant/quantity columns.
pub struct UpdateStockForm {
    pub product_id: i32,
    #[serde(default)]
    pub variant: Vec<String>,
    #[serde(default)]
    pub quantity: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateStockPayload {
    pub product_id: ProductId,
    pub stock: Vec<StockLevel>,
}

/// Zips the variant and quantity columns, skipping rows without a variant.
fn collect_stock(variants: &[String], quantities: &[i32]) -> Result<Vec<StockLevel>, FormError> {
    let mut seen = HashSet::new();
    let mut stock = Vec::new();

    for (variant, quantity) in variants.iter().zip(quantities.iter().copied()) {
        let variant = variant.trim();
        if variant.is_empty() {
            continue;
        }
        if quantity < 0 {
            return Err(FormError::NegativeQuantity);
        }
        if !seen.insert(variant.to_lowercase()) {
            return Err(FormError::DuplicateVariant(variant.to_string()));
        }
        stock.push(StockLevel::new(variant, quantity));
    }

    Ok(stock)
}

impl TryFrom<AddProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: AddProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let category = match Selection::<CategoryId>::from_raw(form.category_id) {
            Selection::Id(id) => Some(id),
            Selection::Any | Selection::Unassigned => None,
        };

        Ok(Self {
            code: ProductCode::new(form.code).map_err(|_| FormError::InvalidCode)?,
            name: ProductName::new(form.name).map_err(|_| FormError::InvalidName)?,
            category_id: category,
            price: parse_amount(form.price)?,
            stock: collect_stock(&form.variant, &form.quantity)?,
        })
    }
}

impl TryFrom<UpdateStockForm> for UpdateStockPayload {
    type Error = FormError;

    fn try_from(form: UpdateStockForm) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: ProductId::new(form.product_id).map_err(|_| FormError::InvalidId)?,
            stock: collect_stock(&form.variant, &form.quantity)?,
        })
    }
}
