use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::{BearerAuth, helpers};
use crate::coordinators::BeneficiaryCoordinator;
use crate::errors::ManagementError;
use crate::providers::TokenProvider;
use crate::types::dto::beneficiary::{
    BeneficiaryDetailResponse, BeneficiaryListResponse, BeneficiaryRequest,
};
use crate::types::dto::common::MutationResponse;
use crate::types::internal::BeneficiaryForm;

/// Beneficiary registry endpoints
pub struct BeneficiariesApi {
    beneficiary_coordinator: Arc<BeneficiaryCoordinator>,
    token_provider: Arc<TokenProvider>,
}

impl BeneficiariesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: app_data.token_provider.clone(),
            beneficiary_coordinator: Arc::new(BeneficiaryCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum BeneficiaryTags {
    /// Registered people with disabilities
    Beneficiaries,
}

fn parse_form(body: &BeneficiaryRequest) -> Result<BeneficiaryForm, ManagementError> {
    BeneficiaryForm::parse(
        &body.full_name,
        body.birth_date.as_deref(),
        body.disability_type.as_deref(),
        body.notes.as_deref(),
    )
    .map_err(ManagementError::from_internal_error)
}

#[OpenApi(prefix_path = "/beneficiaries")]
impl BeneficiariesApi {
    /// List beneficiaries, newest first
    #[oai(path = "/", method = "get", tag = "BeneficiaryTags::Beneficiaries")]
    async fn list(&self, req: &Request, auth: BearerAuth) -> Result<Json<BeneficiaryListResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        Ok(Json(self.beneficiary_coordinator.list(&ctx).await?))
    }

    /// Register a beneficiary
    #[oai(path = "/", method = "post", tag = "BeneficiaryTags::Beneficiaries")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<BeneficiaryRequest>,
    ) -> Result<Json<MutationResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        let form = parse_form(&body)?;
        Ok(Json(self.beneficiary_coordinator.create(&ctx, form).await?))
    }

    /// Beneficiary profile with its requests and a status summary
    #[oai(path = "/:id", method = "get", tag = "BeneficiaryTags::Beneficiaries")]
    async fn detail(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<BeneficiaryDetailResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        Ok(Json(self.beneficiary_coordinator.detail(&ctx, &id).await?))
    }

    /// Replace a beneficiary's details
    #[oai(path = "/:id", method = "put", tag = "BeneficiaryTags::Beneficiaries")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<BeneficiaryRequest>,
    ) -> Result<Json<MutationResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        let form = parse_form(&body)?;
        Ok(Json(self.beneficiary_coordinator.update(&ctx, &id, form).await?))
    }

    /// Delete a beneficiary together with all of its requests
    #[oai(path = "/:id", method = "delete", tag = "BeneficiaryTags::Beneficiaries")]
    async fn delete(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MutationResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        Ok(Json(self.beneficiary_coordinator.delete(&ctx, &id).await?))
    }
}
