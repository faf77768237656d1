//! Row models for the orders list.

use serde::Serialize;

use crate::domain::order::{Order, OrderStatus};
use crate::domain::status::PillCategory;
use crate::dto::format::{format_currency, format_datetime_as_date};

/// Order projected for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderRow {
    pub id: i32,
    pub order_number: String,
    pub client_name: String,
    pub date: String,
    pub total: String,
    pub items_count: u32,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub pill: PillCategory,
    pub shipment: String,
    /// Whether the status dropdown offers any transition.
    pub can_change_status: bool,
}

impl From<Order> for OrderRow {
    fn from(order: Order) -> Self {
        let shipment = match order.shipment_id {
            Some(id) => format!("Envío #{id}"),
            None => "Sin asignar".to_string(),
        };

        Self {
            id: order.id.get(),
            order_number: order.order_number,
            client_name: order.client_name,
            date: format_datetime_as_date(order.created_at),
            total: format_currency(order.total),
            items_count: order.items_count,
            status: order.status,
            status_label: order.status.label(),
            pill: order.status.pill(),
            shipment,
            can_change_status: !order.status.next_statuses().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::types::{OrderId, ShipmentId};

    fn order(status: OrderStatus, shipment: Option<i32>) -> Order {
        Order {
            id: OrderId::new(12).unwrap(),
            order_number: "A-0012".into(),
            client_name: "Almacén Norte".into(),
            created_at: NaiveDate::from_ymd_opt(2024, 7, 4)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap(),
            total: dec!(804),
            status,
            shipment_id: shipment.map(|id| ShipmentId::new(id).unwrap()),
            items_count: 3,
        }
    }

    #[test]
    fn projects_display_values() {
        let row = OrderRow::from(order(OrderStatus::Shipped, Some(5)));

        assert_eq!(row.date, "04/07/2024");
        assert_eq!(row.total, "$804,00");
        assert_eq!(row.status_label, "Enviado");
        assert_eq!(row.pill, PillCategory::InProgress);
        assert_eq!(row.shipment, "Envío #5");
        assert!(row.can_change_status);
    }

    #[test]
    fn terminal_and_unknown_statuses_lock_the_dropdown() {
        let row = OrderRow::from(order(OrderStatus::Unknown, None));

        assert_eq!(row.pill, PillCategory::Initial);
        assert_eq!(row.shipment, "Sin asignar");
        assert!(!row.can_change_status);
    }
}
