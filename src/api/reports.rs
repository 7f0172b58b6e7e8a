use std::sync::Arc;

use chrono::Utc;
use poem::Request;
use poem_openapi::{
    ApiResponse, OpenApi, Tags,
    param::Query,
    payload::{Binary, Json},
};

use crate::AppData;
use crate::api::{BearerAuth, helpers};
use crate::coordinators::ReportCoordinator;
use crate::errors::ManagementError;
use crate::providers::TokenProvider;
use crate::providers::report_pdf_provider::report_file_name;
use crate::types::dto::report::{DashboardResponse, ReportResponse};
use crate::types::internal::{Priority, ReportFilter, RequestStatus};

/// Dashboard and report endpoints
pub struct ReportsApi {
    report_coordinator: Arc<ReportCoordinator>,
    token_provider: Arc<TokenProvider>,
}

impl ReportsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: app_data.token_provider.clone(),
            report_coordinator: Arc::new(ReportCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum ReportTags {
    /// Aggregated statistics
    Reports,
}

/// Downloadable report document
#[derive(ApiResponse)]
pub enum ReportPdfResponse {
    #[oai(status = 200, content_type = "application/pdf")]
    Ok(
        Binary<Vec<u8>>,
        #[oai(header = "Content-Disposition")] String,
    ),
}

#[OpenApi]
impl ReportsApi {
    /// Headline numbers and the five most recent requests
    #[oai(path = "/dashboard", method = "get", tag = "ReportTags::Reports")]
    async fn dashboard(&self, req: &Request, auth: BearerAuth) -> Result<Json<DashboardResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        Ok(Json(self.report_coordinator.dashboard(&ctx).await?))
    }

    /// Report aggregates, optionally filtered by status and priority
    ///
    /// Beneficiary totals are never filtered.
    #[oai(path = "/reports", method = "get", tag = "ReportTags::Reports")]
    async fn report(
        &self,
        req: &Request,
        auth: BearerAuth,
        status: Query<Option<RequestStatus>>,
        priority: Query<Option<Priority>>,
    ) -> Result<Json<ReportResponse>, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        let filter = ReportFilter::new(status.0, priority.0);
        Ok(Json(self.report_coordinator.report(&ctx, filter).await?))
    }

    /// Same report rendered as a PDF attachment
    #[oai(path = "/reports/pdf", method = "get", tag = "ReportTags::Reports")]
    async fn report_pdf(
        &self,
        req: &Request,
        auth: BearerAuth,
        status: Query<Option<RequestStatus>>,
        priority: Query<Option<Priority>>,
    ) -> Result<ReportPdfResponse, ManagementError> {
        let ctx = helpers::management_context(req, &auth, &self.token_provider)?;
        let filter = ReportFilter::new(status.0, priority.0);
        let generated_at = Utc::now();

        let pdf = self
            .report_coordinator
            .report_pdf(&ctx, filter, generated_at)
            .await?;

        Ok(ReportPdfResponse::Ok(
            Binary(pdf),
            format!("attachment; filename=\"{}\"", report_file_name(generated_at)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{create_test_beneficiary, create_test_request, setup_test_app_data, signed_in_bearer};

    #[tokio::test]
    async fn test_report_filters_requests_but_not_beneficiaries() {
        let app_data = setup_test_app_data().await;
        let ana = create_test_beneficiary(&app_data, "Ana García").await;
        create_test_beneficiary(&app_data, "Luis Pérez").await;
        create_test_request(&app_data, &ana.id, Priority::High).await;
        let delivered = create_test_request(&app_data, &ana.id, Priority::Low).await;
        app_data
            .request_store
            .update_status(&delivered.id, RequestStatus::Approved)
            .await
            .unwrap();
        app_data
            .request_store
            .update_status(&delivered.id, RequestStatus::Delivered)
            .await
            .unwrap();

        let api = ReportsApi::new(app_data.clone());
        let req = Request::builder().finish();
        let report = api
            .report(
                &req,
                signed_in_bearer(&app_data).await,
                Query(Some(RequestStatus::Pending)),
                Query(None),
            )
            .await
            .unwrap();

        assert_eq!(report.total_beneficiaries, 2);
        assert_eq!(report.total_requests, 1);
        assert!(report.recent_requests.iter().all(|r| r.status == RequestStatus::Pending));
    }

    #[tokio::test]
    async fn test_pdf_is_an_attachment() {
        let app_data = setup_test_app_data().await;
        let api = ReportsApi::new(app_data.clone());
        let req = Request::builder().finish();

        let ReportPdfResponse::Ok(pdf, disposition) = api
            .report_pdf(&req, signed_in_bearer(&app_data).await, Query(None), Query(None))
            .await
            .unwrap();

        assert!(pdf.0.starts_with(b"%PDF"));
        assert!(disposition.starts_with("attachment; filename=\"reporte-"));
        assert!(disposition.ends_with(".pdf\""));
    }
}
