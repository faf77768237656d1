use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::status::{PillCategory, StatusStyle, StatusTable};
use crate::domain::types::{OrderId, ShipmentId};
use crate::search::request::{FilterMap, SearchFilters, Selection, is_date_range_valid};

/// Lifecycle of an order. Codes the backend sends that are not listed here
/// decode as [`OrderStatus::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    InPreparation,
    Prepared,
    Shipped,
    Finished,
    Cancelled,
    PaymentRejected,
    PaymentPending,
    Unknown,
}

impl OrderStatus {
    pub const KNOWN: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::InPreparation,
        OrderStatus::Prepared,
        OrderStatus::Shipped,
        OrderStatus::Finished,
        OrderStatus::Cancelled,
        OrderStatus::PaymentRejected,
        OrderStatus::PaymentPending,
    ];

    /// Wire code of the status.
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InPreparation => "IN_PREPARATION",
            OrderStatus::Prepared => "PREPARED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Finished => "FINISHED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::PaymentRejected => "PAYMENT_REJECTED",
            OrderStatus::PaymentPending => "PAYMENT_PENDING",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }

    /// Numeric id used by `PATCH /orders/{id}` and the status filter.
    pub fn id(&self) -> Option<i32> {
        match self {
            OrderStatus::Pending => Some(1),
            OrderStatus::InPreparation => Some(2),
            OrderStatus::Prepared => Some(3),
            OrderStatus::Shipped => Some(4),
            OrderStatus::Finished => Some(5),
            OrderStatus::Cancelled => Some(6),
            OrderStatus::PaymentRejected => Some(7),
            OrderStatus::PaymentPending => Some(8),
            OrderStatus::Unknown => None,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::KNOWN.into_iter().find(|status| status.id() == Some(id))
    }

    pub fn label(&self) -> &'static str {
        ORDER_STATUSES.label(self)
    }

    pub fn pill(&self) -> PillCategory {
        map_status_to_pill_status(*self)
    }

    /// Statuses an order may be moved to from this one.
    pub fn next_statuses(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::PaymentPending => &[
                OrderStatus::Pending,
                OrderStatus::PaymentRejected,
                OrderStatus::Cancelled,
            ],
            OrderStatus::Pending => &[OrderStatus::InPreparation, OrderStatus::Cancelled],
            OrderStatus::InPreparation => &[OrderStatus::Prepared, OrderStatus::Cancelled],
            OrderStatus::Prepared => &[OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => &[OrderStatus::Finished],
            OrderStatus::Finished
            | OrderStatus::Cancelled
            | OrderStatus::PaymentRejected
            | OrderStatus::Unknown => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.next_statuses().contains(&next)
    }
}

impl From<&str> for OrderStatus {
    fn from(code: &str) -> Self {
        OrderStatus::KNOWN
            .into_iter()
            .find(|status| status.code().eq_ignore_ascii_case(code.trim()))
            .unwrap_or(OrderStatus::Unknown)
    }
}

impl From<String> for OrderStatus {
    fn from(code: String) -> Self {
        code.as_str().into()
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.code().to_string()
    }
}

const ORDER_STATUS_STYLES: &[(OrderStatus, StatusStyle)] = &[
    (
        OrderStatus::Pending,
        StatusStyle::new("Pendiente", PillCategory::Initial),
    ),
    (
        OrderStatus::InPreparation,
        StatusStyle::new("En preparación", PillCategory::InProgress),
    ),
    (
        OrderStatus::Prepared,
        StatusStyle::new("Preparado", PillCategory::InProgress),
    ),
    (
        OrderStatus::Shipped,
        StatusStyle::new("Enviado", PillCategory::InProgress),
    ),
    (
        OrderStatus::Finished,
        StatusStyle::new("Finalizado", PillCategory::Done),
    ),
    (
        OrderStatus::Cancelled,
        StatusStyle::new("Cancelado", PillCategory::Cancelled),
    ),
    (
        OrderStatus::PaymentRejected,
        StatusStyle::new("Pago rechazado", PillCategory::Cancelled),
    ),
    (
        OrderStatus::PaymentPending,
        StatusStyle::new("Pago pendiente", PillCategory::Warning),
    ),
];

static ORDER_STATUSES: StatusTable<OrderStatus> = StatusTable::new(
    ORDER_STATUS_STYLES,
    StatusStyle::new("Sin estado", PillCategory::Initial),
);

/// Pill colour for an order status; unmapped statuses fall back to `Initial`.
pub fn map_status_to_pill_status(status: OrderStatus) -> PillCategory {
    ORDER_STATUSES.pill(&status)
}

/// Order as returned by `POST /orders/search`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub client_name: String,
    pub created_at: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub shipment_id: Option<ShipmentId>,
    #[serde(default)]
    pub items_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order as returned by `GET /orders/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `PATCH /orders/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub order_status_id: i32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderFilters {
    pub statuses: Vec<OrderStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub shipment: Selection<ShipmentId>,
}

impl OrderFilters {
    pub fn is_date_range_valid(&self) -> bool {
        is_date_range_valid(self.date_from, self.date_to)
    }
}

impl SearchFilters for OrderFilters {
    fn write_filters(&self, filters: &mut FilterMap) {
        filters
            .list("orderStatusIds", self.statuses.iter().filter_map(OrderStatus::id))
            .date("dateFrom", self.date_from)
            .date("dateTo", self.date_to)
            .selection("shipmentId", self.shipment);
    }
}

/// Entry of the shipment selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShipmentOption {
    pub value: Selection<ShipmentId>,
    pub label: String,
}

/// Enumerates the shipment selector options for the orders on screen.
///
/// Always starts with "Todos"; "Sin asignar" is offered when at least one
/// order has no shipment; concrete shipments follow in ascending order.
pub fn shipment_options(orders: &[Order]) -> Vec<ShipmentOption> {
    let mut options = vec![ShipmentOption {
        value: Selection::Any,
        label: "Todos".to_string(),
    }];

    if orders.iter().any(|order| order.shipment_id.is_none()) {
        options.push(ShipmentOption {
            value: Selection::Unassigned,
            label: "Sin asignar".to_string(),
        });
    }

    let ids: BTreeSet<ShipmentId> = orders.iter().filter_map(|order| order.shipment_id).collect();
    options.extend(ids.into_iter().map(|id| ShipmentOption {
        value: Selection::Id(id),
        label: format!("Envío #{id}"),
    }));

    options
}
