use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::status::{PillCategory, StatusStyle, StatusTable};
use crate::domain::types::{
    BusinessName, DocumentNumber, Email, PhoneNumber, RegistrationRequestId, RejectionReason,
};
use crate::search::request::{FilterMap, SearchFilters, is_date_range_valid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegistrationRequestStatus {
    Pending,
    Approved,
    Rejected,
    Unknown,
}

impl RegistrationRequestStatus {
    pub const KNOWN: [RegistrationRequestStatus; 3] = [
        RegistrationRequestStatus::Pending,
        RegistrationRequestStatus::Approved,
        RegistrationRequestStatus::Rejected,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RegistrationRequestStatus::Pending => "PENDING",
            RegistrationRequestStatus::Approved => "APPROVED",
            RegistrationRequestStatus::Rejected => "REJECTED",
            RegistrationRequestStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn label(&self) -> &'static str {
        REGISTRATION_STATUSES.label(self)
    }

    pub fn pill(&self) -> PillCategory {
        REGISTRATION_STATUSES.pill(self)
    }

    /// Only pending requests can be approved or rejected.
    pub fn is_actionable(&self) -> bool {
        matches!(self, RegistrationRequestStatus::Pending)
    }
}

impl From<&str> for RegistrationRequestStatus {
    fn from(code: &str) -> Self {
        RegistrationRequestStatus::KNOWN
            .into_iter()
            .find(|status| status.code().eq_ignore_ascii_case(code.trim()))
            .unwrap_or(RegistrationRequestStatus::Unknown)
    }
}

impl From<String> for RegistrationRequestStatus {
    fn from(code: String) -> Self {
        code.as_str().into()
    }
}

impl From<RegistrationRequestStatus> for String {
    fn from(status: RegistrationRequestStatus) -> Self {
        status.code().to_string()
    }
}

const REGISTRATION_STATUS_STYLES: &[(RegistrationRequestStatus, StatusStyle)] = &[
    (
        RegistrationRequestStatus::Pending,
        StatusStyle::new("Pendiente", PillCategory::Warning),
    ),
    (
        RegistrationRequestStatus::Approved,
        StatusStyle::new("Aprobada", PillCategory::Done),
    ),
    (
        RegistrationRequestStatus::Rejected,
        StatusStyle::new("Rechazada", PillCategory::Cancelled),
    ),
];

static REGISTRATION_STATUSES: StatusTable<RegistrationRequestStatus> = StatusTable::new(
    REGISTRATION_STATUS_STYLES,
    StatusStyle::new("Sin estado", PillCategory::Initial),
);

/// Sign-up request submitted by a prospective customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub id: RegistrationRequestId,
    pub business_name: BusinessName,
    pub document_number: DocumentNumber,
    pub email: Email,
    #[serde(default, deserialize_with = "optional_phone")]
    pub phone: Option<PhoneNumber>,
    pub created_at: NaiveDateTime,
    pub status: RegistrationRequestStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// Blank or unparseable phones are treated as missing rather than failing the
/// whole record.
fn optional_phone<'de, D>(deserializer: D) -> Result<Option<PhoneNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|phone| !phone.trim().is_empty())
        .and_then(|phone| match PhoneNumber::new(phone.as_str()) {
            Ok(phone) => Some(phone),
            Err(err) => {
                log::warn!("Ignoring phone {phone:?}: {err}");
                None
            }
        }))
}

/// Body of `POST /registration-requests/{id}/approve`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /registration-requests/{id}/reject`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub reason: RejectionReason,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationRequestFilters {
    pub statuses: Vec<RegistrationRequestStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl RegistrationRequestFilters {
    pub fn is_date_range_valid(&self) -> bool {
        is_date_range_valid(self.date_from, self.date_to)
    }
}

impl SearchFilters for RegistrationRequestFilters {
    fn write_filters(&self, filters: &mut FilterMap) {
        filters
            .list(
                "statuses",
                self.statuses
                    .iter()
                    .filter(|status| **status != RegistrationRequestStatus::Unknown)
                    .map(|status| status.code()),
            )
            .date("dateFrom", self.date_from)
            .date("dateTo", self.date_to);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn statuses_resolve_labels_and_pills() {
        assert_eq!(RegistrationRequestStatus::Pending.label(), "Pendiente");
        assert_eq!(
            RegistrationRequestStatus::Rejected.pill(),
            PillCategory::Cancelled
        );
        assert_eq!(
            RegistrationRequestStatus::from("archived").pill(),
            PillCategory::Initial
        );
    }

    #[test]
    fn only_pending_requests_are_actionable() {
        assert!(RegistrationRequestStatus::Pending.is_actionable());
        assert!(!RegistrationRequestStatus::Approved.is_actionable());
    }

    #[test]
    fn filters_send_status_codes() {
        let filters = RegistrationRequestFilters {
            statuses: vec![
                RegistrationRequestStatus::Pending,
                RegistrationRequestStatus::Unknown,
            ],
            ..RegistrationRequestFilters::default()
        };
        let mut map = FilterMap::new();
        filters.write_filters(&mut map);

        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({"statuses": ["PENDING"]})
        );
    }

    #[test]
    fn request_fields_are_validated_on_decode() {
        let request: RegistrationRequest = serde_json::from_value(json!({
            "id": 4,
            "businessName": " Distribuidora Sur ",
            "documentNumber": "30-71234567-8",
            "email": "Compras@Sur.com.ar",
            "phone": "+54 11 4555-1234",
            "createdAt": "2024-11-02T09:00:00",
            "status": "PENDING"
        }))
        .unwrap();

        assert_eq!(request.business_name.as_str(), "Distribuidora Sur");
        assert_eq!(request.document_number.as_str(), "30712345678");
        assert_eq!(request.email.as_str(), "compras@sur.com.ar");
        assert_eq!(
            request.phone.as_ref().map(PhoneNumber::as_str),
            Some("+541145551234")
        );

        let bad_document = serde_json::from_value::<RegistrationRequest>(json!({
            "id": 4,
            "businessName": "Distribuidora Sur",
            "documentNumber": "abc",
            "email": "compras@sur.com.ar",
            "createdAt": "2024-11-02T09:00:00",
            "status": "PENDING"
        }));
        assert!(bad_document.is_err());
    }

    #[test]
    fn blank_or_invalid_phone_decodes_as_missing() {
        for phone in [json!(null), json!("  "), json!("no tiene")] {
            let request: RegistrationRequest = serde_json::from_value(json!({
                "id": 4,
                "businessName": "Distribuidora Sur",
                "documentNumber": "30712345678",
                "email": "compras@sur.com.ar",
                "phone": phone,
                "createdAt": "2024-11-02T09:00:00",
                "status": "PENDING"
            }))
            .unwrap();
            assert_eq!(request.phone, None);
        }
    }

    #[test]
    fn rejection_body_carries_reason() {
        let body = Rejection {
            reason: RejectionReason::new(" Documento ilegible ").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"reason": "Documento ilegible"})
        );
    }
}
