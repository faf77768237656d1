//! Order list, detail and status workflow.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::order::{Order, OrderDetail};
use crate::domain::types::OrderId;
use crate::dto::orders::OrderRow;
use crate::forms::FormError;
use crate::forms::orders::{UpdateOrderStatusForm, UpdateOrderStatusPayload};
use crate::repository::errors::RepositoryResult;
use crate::repository::{Download, OrderReader, OrderWriter};
use crate::search::orchestrator::ListSource;
use crate::search::request::{SearchRequest, SearchResult};
use crate::services::notifications::ActionMessages;
use crate::services::{ServiceError, ServiceResult};

pub const MSG_STATUS_UPDATED: &str = "Estado del pedido actualizado.";
pub const MSG_STATUS_UPDATE_FAILED: &str = "No se pudo actualizar el estado del pedido.";

pub const STATUS_UPDATE: ActionMessages =
    ActionMessages::new(MSG_STATUS_UPDATED, MSG_STATUS_UPDATE_FAILED);

/// Runs one orders search and projects the page into rows.
pub async fn search_orders<R>(
    repo: &R,
    request: &SearchRequest,
) -> ServiceResult<SearchResult<OrderRow>>
where
    R: OrderReader + ?Sized,
{
    let page = repo.search_orders(request).await?;
    Ok(page.map(OrderRow::from))
}

pub async fn load_order<R>(repo: &R, order_id: i32) -> ServiceResult<OrderDetail>
where
    R: OrderReader + ?Sized,
{
    let order_id = OrderId::new(order_id)?;

    repo.get_order(order_id).await?.ok_or(ServiceError::NotFound)
}

/// Validates the requested transition and patches the order status.
pub async fn update_order_status<R>(repo: &R, form: UpdateOrderStatusForm) -> ServiceResult<OrderRow>
where
    R: OrderWriter + ?Sized,
{
    let payload = UpdateOrderStatusPayload::try_from(form)?;
    let body = payload.body().ok_or(FormError::InvalidStatus)?;

    let order = repo
        .update_order_status(payload.order_id, &body)
        .await
        .map_err(|err| {
            log::error!("Failed to update order {}: {err}", payload.order_id);
            err
        })?;

    log::info!("Order {} moved to {}", order.id, payload.status.code());
    Ok(OrderRow::from(order))
}

pub async fn download_orders<R>(repo: &R, request: &SearchRequest) -> ServiceResult<Download>
where
    R: OrderReader + ?Sized,
{
    Ok(repo.download_orders(request).await?)
}

/// Feeds the orders list orchestrator.
pub struct OrderListSource<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> OrderListSource<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> ListSource for OrderListSource<R>
where
    R: OrderReader + ?Sized + 'static,
{
    type Item = Order;

    async fn fetch(&self, request: SearchRequest) -> RepositoryResult<SearchResult<Order>> {
        self.repo.search_orders(&request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tokio::time::sleep;

    use super::*;
    use crate::domain::order::{OrderFilters, OrderStatus, OrderStatusUpdate};
    use crate::models::config::ClientConfig;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::search::orchestrator::{OrchestratorOptions, SearchOrchestrator};
    use crate::search::request::{Selection, build_request};
    use crate::search::state::{FilterAction, FilterState};
    use crate::services::notifications::Notification;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(5).unwrap(),
            order_number: "A-0005".into(),
            client_name: "Kiosco Centro".into(),
            created_at: NaiveDate::from_ymd_opt(2024, 4, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            total: dec!(804),
            status,
            shipment_id: None,
            items_count: 2,
        }
    }

    #[tokio::test]
    async fn search_projects_rows() {
        let mut repo = MockRepository::new();
        repo.expect_search_orders()
            .withf(|request| request.page == 1 && request.filters.is_empty())
            .times(1)
            .returning(|_| {
                Ok(SearchResult {
                    total: 1,
                    results: vec![order(OrderStatus::Pending)],
                })
            });

        let request = build_request(&FilterState::<()>::new(10));
        let page = search_orders(&repo, &request).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.results[0].total, "$804,00");
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_order().returning(|_| Ok(None));

        assert!(matches!(
            load_order(&repo, 5).await,
            Err(ServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn invalid_id_never_hits_backend() {
        let mut repo = MockRepository::new();
        repo.expect_get_order().times(0);

        assert!(matches!(
            load_order(&repo, 0).await,
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[tokio::test]
    async fn status_update_sends_numeric_id() {
        let mut repo = MockRepository::new();
        repo.expect_update_order_status()
            .withf(|id, update| {
                id.get() == 5 && *update == OrderStatusUpdate { order_status_id: 4 }
            })
            .times(1)
            .returning(|_, _| Ok(order(OrderStatus::Shipped)));

        let form = UpdateOrderStatusForm {
            order_id: 5,
            current_status: "PREPARED".into(),
            order_status_id: 4,
        };
        let result = update_order_status(&repo, form).await;

        assert_eq!(
            STATUS_UPDATE.notification(&result),
            Notification::success(MSG_STATUS_UPDATED)
        );
        assert_eq!(result.unwrap().status_label, "Enviado");
    }

    #[tokio::test]
    async fn invalid_transition_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_update_order_status().times(0);

        let form = UpdateOrderStatusForm {
            order_id: 5,
            current_status: "CANCELLED".into(),
            order_status_id: 1,
        };

        assert!(matches!(
            update_order_status(&repo, form).await,
            Err(ServiceError::Form(_))
        ));
    }

    #[tokio::test]
    async fn backend_message_is_kept() {
        let mut repo = MockRepository::new();
        repo.expect_update_order_status().returning(|_, _| {
            Err(RepositoryError::Api {
                status: 422,
                message: "El pedido ya fue facturado".into(),
            })
        });

        let form = UpdateOrderStatusForm {
            order_id: 5,
            current_status: "PENDING".into(),
            order_status_id: 6,
        };

        let result = update_order_status(&repo, form).await;

        assert!(matches!(
            &result,
            Err(ServiceError::Backend(message)) if message == "El pedido ya fue facturado"
        ));
        assert_eq!(
            STATUS_UPDATE.notification(&result),
            Notification::error("El pedido ya fue facturado")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn orchestrator_projects_orders_from_list_source() {
        let calls = Arc::new(Mutex::new(Vec::<SearchRequest>::new()));
        let recorded = Arc::clone(&calls);
        let mut repo = MockRepository::new();
        repo.expect_search_orders().returning(move |request| {
            recorded.lock().unwrap().push(request.clone());
            Ok(SearchResult {
                total: 1,
                results: vec![order(OrderStatus::Pending)],
            })
        });

        let config = ClientConfig {
            api_url: "http://localhost:8080/api".into(),
            token: None,
            debounce_ms: 300,
            page_size: 10,
            request_timeout_secs: 30,
        };
        let initial = FilterState::new(config.page_size).with_filters(OrderFilters {
            shipment: Selection::Unassigned,
            ..OrderFilters::default()
        });
        let orchestrator: SearchOrchestrator<OrderFilters, OrderRow> = SearchOrchestrator::spawn(
            OrderListSource::new(Arc::new(repo)),
            initial,
            OrchestratorOptions::from_config(&config),
        );
        sleep(Duration::from_millis(1)).await;

        let store = orchestrator.results();
        assert_eq!(store.total(), 1);
        assert_eq!(store.results()[0].total, "$804,00");
        assert_eq!(store.results()[0].shipment, "Sin asignar");
        assert_eq!(
            calls.lock().unwrap()[0].filters.get("shipmentId"),
            Some(&Value::Null)
        );

        orchestrator.dispatch(FilterAction::SetFilters(OrderFilters::default()));
        sleep(Duration::from_millis(299)).await;
        assert_eq!(calls.lock().unwrap().len(), 1);

        sleep(Duration::from_millis(2)).await;
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(!calls[1].filters.contains_key("shipmentId"));
    }
}
