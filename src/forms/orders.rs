use serde::Deserialize;

use crate::domain::order::{OrderStatus, OrderStatusUpdate};
use crate::domain::types::OrderId;
use crate::forms::FormError;

/// Status dropdown submission on the orders list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusForm {
    pub order_id: i32,
    /// Status the row showed when the dropdown was opened.
    pub current_status: String,
    pub order_status_id: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateOrderStatusPayload {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

impl TryFrom<UpdateOrderStatusForm> for UpdateOrderStatusPayload {
    type Error = FormError;

    fn try_from(form: UpdateOrderStatusForm) -> Result<Self, Self::Error> {
        let order_id = OrderId::new(form.order_id).map_err(|_| FormError::InvalidId)?;
        let status = OrderStatus::from_id(form.order_status_id).ok_or(FormError::InvalidStatus)?;
        let current = OrderStatus::from(form.current_status);

        // Unknown current statuses are left for the backend to judge.
        if current != OrderStatus::Unknown && !current.can_transition_to(status) {
            return Err(FormError::InvalidTransition {
                from: current.label(),
                to: status.label(),
            });
        }

        Ok(Self { order_id, status })
    }
}

impl UpdateOrderStatusPayload {
    pub fn body(&self) -> Option<OrderStatusUpdate> {
        self.status.id().map(|order_status_id| OrderStatusUpdate { order_status_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(current: &str, next: i32) -> UpdateOrderStatusForm {
        UpdateOrderStatusForm {
            order_id: 10,
            current_status: current.to_string(),
            order_status_id: next,
        }
    }

    #[test]
    fn allowed_transition_builds_body() {
        let payload = UpdateOrderStatusPayload::try_from(form("PENDING", 2)).unwrap();

        assert_eq!(payload.status, OrderStatus::InPreparation);
        assert_eq!(payload.body(), Some(OrderStatusUpdate { order_status_id: 2 }));
    }

    #[test]
    fn disallowed_transition_is_rejected() {
        let err = UpdateOrderStatusPayload::try_from(form("FINISHED", 1)).unwrap_err();
        assert_eq!(err.to_string(), "No se puede pasar de Finalizado a Pendiente");
    }

    #[test]
    fn unknown_status_id_is_rejected() {
        assert!(matches!(
            UpdateOrderStatusPayload::try_from(form("PENDING", 42)),
            Err(FormError::InvalidStatus)
        ));
    }
}
