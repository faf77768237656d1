//! Review queue for customer registration requests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::registration_request::RegistrationRequest;
use crate::domain::types::RegistrationRequestId;
use crate::dto::registration_requests::RegistrationRequestRow;
use crate::forms::registration_requests::{
    ApproveRequestForm, ApproveRequestPayload, RejectRequestForm, RejectRequestPayload,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{Download, RegistrationRequestReader, RegistrationRequestWriter};
use crate::search::orchestrator::ListSource;
use crate::search::request::{SearchRequest, SearchResult};
use crate::services::notifications::ActionMessages;
use crate::services::{ServiceError, ServiceResult};

pub const MSG_REQUEST_APPROVED: &str = "Solicitud aprobada.";
pub const MSG_REQUEST_REJECTED: &str = "Solicitud rechazada.";
pub const MSG_REVIEW_FAILED: &str = "No se pudo procesar la solicitud.";
pub const MSG_ALREADY_REVIEWED: &str = "La solicitud ya fue procesada.";
pub const MSG_DUPLICATE_DOCUMENT: &str = "El documento ya se encuentra registrado";

pub const APPROVE: ActionMessages = ActionMessages::new(MSG_REQUEST_APPROVED, MSG_REVIEW_FAILED);
pub const REJECT: ActionMessages = ActionMessages::new(MSG_REQUEST_REJECTED, MSG_REVIEW_FAILED);

pub async fn search_registration_requests<R>(
    repo: &R,
    request: &SearchRequest,
) -> ServiceResult<SearchResult<RegistrationRequestRow>>
where
    R: RegistrationRequestReader + ?Sized,
{
    let page = repo.search_registration_requests(request).await?;
    Ok(page.map(RegistrationRequestRow::from))
}

pub async fn load_registration_request<R>(
    repo: &R,
    request_id: i32,
) -> ServiceResult<RegistrationRequest>
where
    R: RegistrationRequestReader + ?Sized,
{
    let request_id = RegistrationRequestId::new(request_id)?;
    find_request(repo, request_id).await
}

async fn find_request<R>(
    repo: &R,
    request_id: RegistrationRequestId,
) -> ServiceResult<RegistrationRequest>
where
    R: RegistrationRequestReader + ?Sized,
{
    repo.get_registration_request(request_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

async fn ensure_reviewable<R>(repo: &R, request_id: RegistrationRequestId) -> ServiceResult<()>
where
    R: RegistrationRequestReader + ?Sized,
{
    let current = find_request(repo, request_id).await?;
    if current.status.is_actionable() {
        Ok(())
    } else {
        Err(ServiceError::Form(MSG_ALREADY_REVIEWED.to_string()))
    }
}

/// Approves a pending request. A 409 means the document is already a customer.
pub async fn approve_registration_request<R>(
    repo: &R,
    form: ApproveRequestForm,
) -> ServiceResult<RegistrationRequestRow>
where
    R: RegistrationRequestReader + RegistrationRequestWriter + ?Sized,
{
    let payload = ApproveRequestPayload::try_from(form)?;
    ensure_reviewable(repo, payload.id).await?;

    let request = repo
        .approve_registration_request(payload.id, &payload.approval)
        .await
        .map_err(ServiceError::conflict_on("documentNumber", MSG_DUPLICATE_DOCUMENT))?;

    log::info!("Approved registration request {}", request.id);
    Ok(RegistrationRequestRow::from(request))
}

pub async fn reject_registration_request<R>(
    repo: &R,
    form: RejectRequestForm,
) -> ServiceResult<RegistrationRequestRow>
where
    R: RegistrationRequestReader + RegistrationRequestWriter + ?Sized,
{
    let payload = RejectRequestPayload::try_from(form)?;
    ensure_reviewable(repo, payload.id).await?;

    let request = repo
        .reject_registration_request(payload.id, &payload.rejection)
        .await
        .map_err(|err| {
            log::error!("Failed to reject registration request {}: {err}", payload.id);
            err
        })?;

    log::info!("Rejected registration request {}", request.id);
    Ok(RegistrationRequestRow::from(request))
}

pub async fn download_registration_requests<R>(
    repo: &R,
    request: &SearchRequest,
) -> ServiceResult<Download>
where
    R: RegistrationRequestReader + ?Sized,
{
    Ok(repo.download_registration_requests(request).await?)
}

pub struct RegistrationRequestListSource<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> RegistrationRequestListSource<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> ListSource for RegistrationRequestListSource<R>
where
    R: RegistrationRequestReader + ?Sized + 'static,
{
    type Item = RegistrationRequest;

    async fn fetch(
        &self,
        request: SearchRequest,
    ) -> RepositoryResult<SearchResult<RegistrationRequest>> {
        self.repo.search_registration_requests(&request).await
    }
}
