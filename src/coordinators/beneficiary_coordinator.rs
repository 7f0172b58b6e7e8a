use std::sync::Arc;

use crate::app_data::AppData;
use crate::cache::{PageCache, keys};
use crate::errors::InternalError;
use crate::stores::{BeneficiaryStore, RequestStore};
use crate::types::dto::beneficiary::{
    BeneficiaryDetailResponse, BeneficiaryListResponse, BeneficiaryResponse, RequestStatusSummary,
};
use crate::types::dto::common::MutationResponse;
use crate::types::dto::request::RequestResponse;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{BeneficiaryForm, RequestStatus};

/// Beneficiary registration, edit and removal workflows
pub struct BeneficiaryCoordinator {
    beneficiary_store: Arc<BeneficiaryStore>,
    request_store: Arc<RequestStore>,
    page_cache: Arc<PageCache>,
}

impl BeneficiaryCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            beneficiary_store: app_data.beneficiary_store.clone(),
            request_store: app_data.request_store.clone(),
            page_cache: app_data.page_cache.clone(),
        }
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<BeneficiaryListResponse, InternalError> {
        ctx.require_session()?;

        self.page_cache
            .get_or_load(keys::BENEFICIARY_LIST, || self.load_list())
            .await
    }

    /// Beneficiary with its requests and a per-status summary
    pub async fn detail(&self, ctx: &RequestContext, id: &str) -> Result<BeneficiaryDetailResponse, InternalError> {
        ctx.require_session()?;

        self.page_cache
            .get_or_load(&keys::beneficiary_detail(id), || self.load_detail(id))
            .await
    }

    pub async fn create(&self, ctx: &RequestContext, form: BeneficiaryForm) -> Result<MutationResponse, InternalError> {
        ctx.require_session()?;

        let beneficiary = self.beneficiary_store.create(form).await?;

        self.page_cache.invalidate(keys::BENEFICIARY_LIST);
        self.invalidate_summaries();

        tracing::debug!(request_id = %ctx.request_id, actor = %ctx.actor_id, beneficiary_id = %beneficiary.id, "Beneficiary created");
        Ok(MutationResponse::new(
            "Beneficiario registrado exitosamente",
            keys::BENEFICIARY_LIST,
            Some(beneficiary.id),
        ))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        form: BeneficiaryForm,
    ) -> Result<MutationResponse, InternalError> {
        ctx.require_session()?;

        let beneficiary = self.beneficiary_store.update(id, form).await?;

        // Request pages show the beneficiary's name
        self.page_cache.invalidate_prefix(keys::BENEFICIARY_LIST);
        self.page_cache.invalidate_prefix(keys::REQUEST_LIST);
        self.invalidate_summaries();

        tracing::debug!(request_id = %ctx.request_id, actor = %ctx.actor_id, beneficiary_id = %id, "Beneficiary updated");
        Ok(MutationResponse::new(
            "Beneficiario actualizado exitosamente",
            keys::beneficiary_detail(&beneficiary.id),
            Some(beneficiary.id),
        ))
    }

    /// Remove a beneficiary and, with it, all of its requests
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<MutationResponse, InternalError> {
        ctx.require_session()?;

        let removed_requests = self.beneficiary_store.delete(id).await?;

        self.page_cache.invalidate_prefix(keys::BENEFICIARY_LIST);
        self.page_cache.invalidate_prefix(keys::REQUEST_LIST);
        self.invalidate_summaries();

        tracing::debug!(request_id = %ctx.request_id, actor = %ctx.actor_id, beneficiary_id = %id, removed_requests, "Beneficiary removed");
        Ok(MutationResponse::new(
            "Beneficiario eliminado exitosamente",
            keys::BENEFICIARY_LIST,
            Some(id.to_string()),
        ))
    }

    async fn load_list(&self) -> Result<BeneficiaryListResponse, InternalError> {
        let beneficiaries: Vec<BeneficiaryResponse> = self
            .beneficiary_store
            .list()
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(BeneficiaryListResponse {
            total: beneficiaries.len() as u64,
            beneficiaries,
        })
    }

    async fn load_detail(&self, id: &str) -> Result<BeneficiaryDetailResponse, InternalError> {
        let beneficiary = self.beneficiary_store.get(id).await?;
        let requests = self.request_store.list_for_beneficiary(id).await?;

        let mut summary = RequestStatusSummary {
            total: requests.len() as u64,
            ..Default::default()
        };
        for request in &requests {
            match request.status {
                RequestStatus::Pending => summary.pending += 1,
                RequestStatus::Approved => summary.approved += 1,
                RequestStatus::Rejected => summary.rejected += 1,
                RequestStatus::Delivered => summary.delivered += 1,
            }
        }

        let requests = requests
            .into_iter()
            .map(|request| RequestResponse {
                beneficiary_name: Some(beneficiary.full_name.clone()),
                ..RequestResponse::from(request)
            })
            .collect();

        Ok(BeneficiaryDetailResponse {
            beneficiary: beneficiary.into(),
            requests,
            summary,
        })
    }

    fn invalidate_summaries(&self) {
        self.page_cache.invalidate(keys::DASHBOARD);
        self.page_cache.invalidate_prefix(keys::REPORTS_PREFIX);
    }
}
