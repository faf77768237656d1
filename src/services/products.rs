//! Product catalog and stock editing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::product::{NewProduct, Product, StockUpdate};
use crate::domain::types::ProductId;
use crate::dto::products::{ProductRow, StockChangeRow};
use crate::forms::products::{AddProductForm, UpdateStockForm, UpdateStockPayload};
use crate::repository::errors::RepositoryResult;
use crate::repository::{Download, ProductReader, ProductWriter};
use crate::search::orchestrator::ListSource;
use crate::search::request::{SearchRequest, SearchResult};
use crate::services::notifications::{ActionMessages, Notification};
use crate::services::{ServiceError, ServiceResult};

pub const MSG_PRODUCT_CREATED: &str = "Producto creado.";
pub const MSG_PRODUCT_CREATE_FAILED: &str = "No se pudo crear el producto.";
pub const MSG_STOCK_UPDATED: &str = "Stock actualizado.";
pub const MSG_STOCK_UPDATE_FAILED: &str = "No se pudo actualizar el stock.";
pub const MSG_STOCK_UNCHANGED: &str = "No hay cambios de stock para guardar.";
pub const MSG_DUPLICATE_CODE: &str = "Ya existe un producto con ese código";

pub const PRODUCT_CREATE: ActionMessages =
    ActionMessages::new(MSG_PRODUCT_CREATED, MSG_PRODUCT_CREATE_FAILED);
pub const STOCK_UPDATE: ActionMessages =
    ActionMessages::new(MSG_STOCK_UPDATED, MSG_STOCK_UPDATE_FAILED);

/// Product after a stock edit together with the audit trail that was sent.
#[derive(Debug)]
pub struct StockUpdateOutcome {
    pub product: ProductRow,
    pub changes: Vec<StockChangeRow>,
}

pub async fn search_products<R>(
    repo: &R,
    request: &SearchRequest,
) -> ServiceResult<SearchResult<ProductRow>>
where
    R: ProductReader + ?Sized,
{
    let page = repo.search_products(request).await?;
    Ok(page.map(ProductRow::from))
}

pub async fn load_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let product_id = ProductId::new(product_id)?;

    repo.get_product(product_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn add_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<ProductRow>
where
    R: ProductWriter + ?Sized,
{
    let new_product = NewProduct::try_from(form)?;

    let product = repo
        .create_product(&new_product)
        .await
        .map_err(ServiceError::conflict_on("code", MSG_DUPLICATE_CODE))?;

    log::info!("Created product {} ({})", product.id, product.code);
    Ok(ProductRow::from(product))
}

/// Replaces the stock of a product, sending the per-variant audit trail.
///
/// Nothing is sent when the submitted stock equals the current one.
pub async fn update_stock<R>(repo: &R, form: UpdateStockForm) -> ServiceResult<StockUpdateOutcome>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let payload = UpdateStockPayload::try_from(form)?;

    let current = repo
        .get_product(payload.product_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let update = StockUpdate::new(&current.stock, payload.stock);
    if update.is_noop() {
        log::debug!("Stock of product {} unchanged", current.id);
        return Ok(StockUpdateOutcome {
            product: ProductRow::from(current),
            changes: Vec::new(),
        });
    }

    let product = repo
        .update_stock(payload.product_id, &update)
        .await
        .map_err(|err| {
            log::error!("Failed to update stock of product {}: {err}", payload.product_id);
            err
        })?;

    Ok(StockUpdateOutcome {
        product: ProductRow::from(product),
        changes: update.changes.into_iter().map(StockChangeRow::from).collect(),
    })
}

/// Notification for a stock edit; an unchanged submission is only informative.
pub fn stock_update_notification(result: &ServiceResult<StockUpdateOutcome>) -> Notification {
    match result {
        Ok(outcome) if outcome.changes.is_empty() => Notification::info(MSG_STOCK_UNCHANGED),
        _ => STOCK_UPDATE.notification(result),
    }
}

pub async fn download_products<R>(repo: &R, request: &SearchRequest) -> ServiceResult<Download>
where
    R: ProductReader + ?Sized,
{
    Ok(repo.download_products(request).await?)
}

/// Feeds the product catalog orchestrator.
pub struct ProductListSource<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> ProductListSource<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> ListSource for ProductListSource<R>
where
    R: ProductReader + ?Sized + 'static,
{
    type Item = Product;

    async fn fetch(&self, request: SearchRequest) -> RepositoryResult<SearchResult<Product>> {
        self.repo.search_products(&request).await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::product::StockLevel;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn product(stock: Vec<StockLevel>) -> Product {
        Product {
            id: ProductId::new(9).unwrap(),
            code: "ACE-900".into(),
            name: "Aceite 900ml".into(),
            category_id: None,
            category_name: Some("Almacén".into()),
            price: dec!(2500),
            active: true,
            stock,
        }
    }

    fn stock_form(quantity: i32) -> UpdateStockForm {
        UpdateStockForm {
            product_id: 9,
            variant: vec!["Única".into()],
            quantity: vec![quantity],
        }
    }

    #[tokio::test]
    async fn stock_update_sends_audit_trail() {
        let mut repo = MockRepository::new();
        repo.expect_get_product()
            .returning(|_| Ok(Some(product(vec![StockLevel::new("Única", 4)]))));
        repo.expect_update_stock()
            .withf(|id, update| {
                id.get() == 9
                    && update.changes.len() == 1
                    && update.changes[0].previous == 4
                    && update.changes[0].current == 10
            })
            .times(1)
            .returning(|_, update| Ok(product(update.stock.clone())));

        let result = update_stock(&repo, stock_form(10)).await;
        assert_eq!(
            stock_update_notification(&result),
            Notification::success(MSG_STOCK_UPDATED)
        );

        let outcome = result.unwrap();
        assert_eq!(outcome.product.stock, 10);
        assert_eq!(outcome.changes[0].delta, "+6");
    }

    #[tokio::test]
    async fn unchanged_stock_skips_request() {
        let mut repo = MockRepository::new();
        repo.expect_get_product()
            .returning(|_| Ok(Some(product(vec![StockLevel::new("Única", 4)]))));
        repo.expect_update_stock().times(0);

        let result = update_stock(&repo, stock_form(4)).await;

        assert_eq!(
            stock_update_notification(&result),
            Notification::info(MSG_STOCK_UNCHANGED)
        );
        assert!(result.unwrap().changes.is_empty());
    }

    #[tokio::test]
    async fn duplicate_code_is_a_field_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_product()
            .returning(|_| Err(RepositoryError::Conflict("duplicate key".into())));

        let form = AddProductForm {
            code: "ACE-900".into(),
            name: "Aceite".into(),
            category_id: -1,
            price: 10.0,
            variant: vec![],
            quantity: vec![],
        };

        let result = add_product(&repo, form).await;

        assert!(matches!(
            result,
            Err(ServiceError::Conflict { field: "code", .. })
        ));
        assert_eq!(
            PRODUCT_CREATE.notification(&result),
            Notification::error(MSG_DUPLICATE_CODE)
        );
    }

    #[tokio::test]
    async fn list_source_forwards_search() {
        let mut repo = MockRepository::new();
        repo.expect_search_products()
            .withf(|request| request.search_text == "aceite")
            .times(1)
            .returning(|_| {
                Ok(SearchResult {
                    total: 1,
                    results: vec![product(vec![])],
                })
            });

        let state = crate::search::state::FilterState::<()>::new(10).with_search_text("aceite");
        let source = ProductListSource::new(Arc::new(repo));
        let page = source
            .fetch(crate::search::request::build_request(&state))
            .await
            .unwrap();

        assert_eq!(ProductRow::from(page.results[0].clone()).status_label, "Sin stock");
    }
}
