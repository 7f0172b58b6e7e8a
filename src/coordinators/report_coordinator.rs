use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::app_data::AppData;
use crate::cache::{PageCache, keys};
use crate::errors::InternalError;
use crate::providers::ReportPdfProvider;
use crate::stores::ReportStore;
use crate::types::dto::report::{DashboardResponse, ReportResponse};
use crate::types::internal::ReportFilter;
use crate::types::internal::context::RequestContext;

const DASHBOARD_RECENT_LIMIT: u64 = 5;

/// Dashboard, report and PDF export
pub struct ReportCoordinator {
    report_store: Arc<ReportStore>,
    page_cache: Arc<PageCache>,
    pdf_provider: ReportPdfProvider,
    recent_limit: u64,
}

impl ReportCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            report_store: app_data.report_store.clone(),
            page_cache: app_data.page_cache.clone(),
            pdf_provider: ReportPdfProvider::new(),
            recent_limit: app_data.settings.report_recent_limit(),
        }
    }

    pub async fn dashboard(&self, ctx: &RequestContext) -> Result<DashboardResponse, InternalError> {
        ctx.require_session()?;

        self.page_cache
            .get_or_load(keys::DASHBOARD, || self.load_dashboard())
            .await
    }

    pub async fn report(&self, ctx: &RequestContext, filter: ReportFilter) -> Result<ReportResponse, InternalError> {
        ctx.require_session()?;

        self.page_cache
            .get_or_load(&keys::report(&filter), || self.load_report(filter))
            .await
    }

    async fn load_dashboard(&self) -> Result<DashboardResponse, InternalError> {
        let data = self
            .report_store
            .report(&ReportFilter::default(), DASHBOARD_RECENT_LIMIT)
            .await?;
        Ok(data.into())
    }

    async fn load_report(&self, filter: ReportFilter) -> Result<ReportResponse, InternalError> {
        let data = self.report_store.report(&filter, self.recent_limit).await?;
        Ok(ReportResponse::new(&filter, data))
    }

    /// Render the filtered report as a PDF
    ///
    /// Always computed from fresh data; PDFs are not cached.
    pub async fn report_pdf(
        &self,
        ctx: &RequestContext,
        filter: ReportFilter,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, InternalError> {
        ctx.require_session()?;

        let data = self.report_store.report(&filter, self.recent_limit).await?;
        let pdf = self.pdf_provider.render(&data, &filter, generated_at)?;

        tracing::info!(request_id = %ctx.request_id, bytes = pdf.len(), "Report PDF generated");
        Ok(pdf)
    }
}
