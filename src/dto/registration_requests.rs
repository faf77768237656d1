//! Row models for the registration requests queue.

use serde::Serialize;

use crate::domain::registration_request::{RegistrationRequest, RegistrationRequestStatus};
use crate::domain::status::PillCategory;
use crate::dto::format::{EMPTY_CELL, format_datetime_as_date};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegistrationRequestRow {
    pub id: i32,
    pub business_name: String,
    pub document_number: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub status: RegistrationRequestStatus,
    pub status_label: &'static str,
    pub pill: PillCategory,
    pub rejection_reason: Option<String>,
    /// Approve/reject buttons are shown only for pending requests.
    pub can_review: bool,
}

impl From<RegistrationRequest> for RegistrationRequestRow {
    fn from(request: RegistrationRequest) -> Self {
        Self {
            id: request.id.get(),
            business_name: request.business_name.into(),
            document_number: request.document_number.into(),
            email: request.email.into(),
            phone: request
                .phone
                .map(String::from)
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            date: format_datetime_as_date(request.created_at),
            status: request.status,
            status_label: request.status.label(),
            pill: request.status.pill(),
            rejection_reason: request.rejection_reason,
            can_review: request.status.is_actionable(),
        }
    }
}
