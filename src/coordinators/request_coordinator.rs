use std::sync::Arc;

use crate::app_data::AppData;
use crate::cache::{PageCache, keys};
use crate::errors::InternalError;
use crate::stores::RequestStore;
use crate::types::db::request;
use crate::types::dto::common::MutationResponse;
use crate::types::dto::request::{RequestDetailResponse, RequestListResponse, RequestResponse};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{RequestAction, RequestEditForm, RequestForm, RequestStatus};

/// Aid request workflows, including status management
pub struct RequestCoordinator {
    request_store: Arc<RequestStore>,
    page_cache: Arc<PageCache>,
}

impl RequestCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            request_store: app_data.request_store.clone(),
            page_cache: app_data.page_cache.clone(),
        }
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<RequestListResponse, InternalError> {
        ctx.require_session()?;

        self.page_cache
            .get_or_load(keys::REQUEST_LIST, || self.load_list())
            .await
    }

    pub async fn detail(&self, ctx: &RequestContext, id: &str) -> Result<RequestDetailResponse, InternalError> {
        ctx.require_session()?;

        self.page_cache
            .get_or_load(&keys::request_detail(id), || self.load_detail(id))
            .await
    }

    pub async fn create(&self, ctx: &RequestContext, form: RequestForm) -> Result<MutationResponse, InternalError> {
        ctx.require_session()?;

        let request = self.request_store.create(form).await?;
        self.invalidate_views(&request);

        tracing::debug!(request_id = %ctx.request_id, actor = %ctx.actor_id, aid_request = %request.id, "Request created");
        Ok(MutationResponse::new(
            "Solicitud creada exitosamente",
            keys::REQUEST_LIST,
            Some(request.id),
        ))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        form: RequestEditForm,
    ) -> Result<MutationResponse, InternalError> {
        ctx.require_session()?;

        let request = self.request_store.update(id, form).await?;
        self.invalidate_views(&request);

        tracing::debug!(request_id = %ctx.request_id, actor = %ctx.actor_id, aid_request = %id, "Request edited");
        Ok(MutationResponse::new(
            "Solicitud actualizada exitosamente",
            keys::request_detail(&request.id),
            Some(request.id),
        ))
    }

    /// Move a request to a new status along the lifecycle
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        id: &str,
        status: RequestStatus,
    ) -> Result<RequestResponse, InternalError> {
        ctx.require_session()?;

        let request = self.request_store.update_status(id, status).await?;
        self.invalidate_views(&request);

        tracing::debug!(request_id = %ctx.request_id, actor = %ctx.actor_id, aid_request = %id, status = %status, "Status changed");
        Ok(request.into())
    }

    /// Apply a named action such as `approve` or `deliver`
    pub async fn apply_action(
        &self,
        ctx: &RequestContext,
        id: &str,
        action: RequestAction,
    ) -> Result<RequestResponse, InternalError> {
        self.change_status(ctx, id, action.target()).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<MutationResponse, InternalError> {
        ctx.require_session()?;

        let request = self.request_store.delete(id).await?;
        self.invalidate_views(&request);

        tracing::debug!(request_id = %ctx.request_id, actor = %ctx.actor_id, aid_request = %id, "Request deleted");
        Ok(MutationResponse::new(
            "Solicitud eliminada exitosamente",
            keys::REQUEST_LIST,
            Some(request.id),
        ))
    }

    async fn load_list(&self) -> Result<RequestListResponse, InternalError> {
        let requests: Vec<RequestResponse> = self
            .request_store
            .list()
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(RequestListResponse {
            total: requests.len() as u64,
            requests,
        })
    }

    async fn load_detail(&self, id: &str) -> Result<RequestDetailResponse, InternalError> {
        Ok(self.request_store.get(id).await?.into())
    }

    /// Pages that show `request`: lists, its detail, its owner's detail and summaries
    fn invalidate_views(&self, request: &request::Model) {
        self.page_cache.invalidate(keys::REQUEST_LIST);
        self.page_cache.invalidate(&keys::request_detail(&request.id));
        self.page_cache.invalidate(&keys::beneficiary_detail(&request.beneficiary_id));
        self.page_cache.invalidate(keys::DASHBOARD);
        self.page_cache.invalidate_prefix(keys::REPORTS_PREFIX);
    }
}
