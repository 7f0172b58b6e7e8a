use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::{BearerAuth, helpers};
use crate::coordinators::RequestCoordinator;
use crate::errors::ManagementError;
use crate::providers::TokenProvider;
use crate::types::dto::common::MutationResponse;
use crate::types::dto::request::{
    CreateRequestRequest, RequestDetailResponse, RequestListResponse, RequestResponse,
    UpdateRequestRequest, UpdateStatusRequest,
};
use crate::types::internal::{RequestAction, RequestEditForm, RequestForm};

/// Aid request endpoints
pub struct RequestsApi {
    request_coordinator: Arc<RequestCoordinator>,
    token_provider: Arc<TokenProvider>,
}

impl RequestsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: app_data.token_provider.clone(),
            request_coordinator: Arc::new(RequestCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum RequestTags {
    /// Aid requests and their lifecycle
    Requests,
}

#[OpenApi(prefix_path = "/requests")]
impl RequestsApi {
    /// List requests with their beneficiary, newest first
    #[oai(path = "/", method = "get", tag = "RequestTags::Requests")]
    async fn list(&self, req: &Request, auth: BearerAuth) -> Result<Json<RequestListResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        Ok(Json(self.request_coordinator.list(&ctx).await?))
    }

    /// Open a new request for a beneficiary; starts as Pendiente
    #[oai(path = "/", method = "post", tag = "RequestTags::Requests")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateRequestRequest>,
    ) -> Result<Json<MutationResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        let form = RequestForm::parse(&body.beneficiary_id, &body.description, body.priority)?;
        Ok(Json(self.request_coordinator.create(&ctx, form).await?))
    }

    #[oai(path = "/:id", method = "get", tag = "RequestTags::Requests")]
    async fn detail(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<RequestDetailResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        Ok(Json(self.request_coordinator.detail(&ctx, &id).await?))
    }

    /// Edit description and priority, optionally moving the status
    #[oai(path = "/:id", method = "put", tag = "RequestTags::Requests")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateRequestRequest>,
    ) -> Result<Json<MutationResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        let form = RequestEditForm::parse(&body.description, body.priority, body.status)?;
        Ok(Json(self.request_coordinator.update(&ctx, &id, form).await?))
    }

    /// Move a request to another status
    ///
    /// Only moves in the lifecycle table are accepted; anything else is a 409.
    #[oai(path = "/:id/status", method = "put", tag = "RequestTags::Requests")]
    async fn change_status(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateStatusRequest>,
    ) -> Result<Json<RequestResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        Ok(Json(self.request_coordinator.change_status(&ctx, &id, body.status).await?))
    }

    /// Apply a named action: approve, reject, deliver or reopen
    #[oai(path = "/:id/actions/:action", method = "post", tag = "RequestTags::Requests")]
    async fn apply_action(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        action: Path<RequestAction>,
    ) -> Result<Json<RequestResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        Ok(Json(self.request_coordinator.apply_action(&ctx, &id, action.0).await?))
    }

    #[oai(path = "/:id", method = "delete", tag = "RequestTags::Requests")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MutationResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        Ok(Json(self.request_coordinator.delete(&ctx, &id).await?))
    }
}
