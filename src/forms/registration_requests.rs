use serde::Deserialize;
use validator::Validate;

use crate::domain::registration_request::{Approval, Rejection};
use crate::domain::types::{RegistrationRequestId, RejectionReason};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct ApproveRequestForm {
    pub id: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RejectRequestForm {
    pub id: i32,
    #[validate(length(max = 500))]
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApproveRequestPayload {
    pub id: RegistrationRequestId,
    pub approval: Approval,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RejectRequestPayload {
    pub id: RegistrationRequestId,
    pub rejection: Rejection,
}

impl TryFrom<ApproveRequestForm> for ApproveRequestPayload {
    type Error = FormError;

    fn try_from(form: ApproveRequestForm) -> Result<Self, Self::Error> {
        let notes = form
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());

        Ok(Self {
            id: RegistrationRequestId::new(form.id).map_err(|_| FormError::InvalidId)?,
            approval: Approval { notes },
        })
    }
}

impl TryFrom<RejectRequestForm> for RejectRequestPayload {
    type Error = FormError;

    fn try_from(form: RejectRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            id: RegistrationRequestId::new(form.id).map_err(|_| FormError::InvalidId)?,
            rejection: Rejection {
                reason: RejectionReason::new(form.reason).map_err(|_| FormError::MissingReason)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reason_is_rejected() {
        let form = RejectRequestForm {
            id: 1,
            reason: "   ".into(),
        };
        assert!(matches!(
            RejectRequestPayload::try_from(form),
            Err(FormError::MissingReason)
        ));
    }

    #[test]
    fn blank_notes_are_dropped() {
        let payload = ApproveRequestPayload::try_from(ApproveRequestForm {
            id: 3,
            notes: Some(" ".into()),
        })
        .unwrap();
        assert_eq!(payload.approval, Approval::default());
    }

    #[test]
    fn invalid_id_is_rejected() {
        assert!(matches!(
            ApproveRequestPayload::try_from(ApproveRequestForm { id: 0, notes: None }),
            Err(FormError::InvalidId)
        ));
    }

    #[test]
    fn reject_payload_carries_trimmed_reason() {
        let payload = RejectRequestPayload::try_from(RejectRequestForm {
            id: 4,
            reason: "  Documento vencido ".into(),
        })
        .unwrap();

        assert_eq!(
            payload,
            RejectRequestPayload {
                id: RegistrationRequestId::new(4).unwrap(),
                rejection: Rejection {
                    reason: RejectionReason::new("Documento vencido").unwrap(),
                },
            }
        );
    }
}
