use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::dto::report_dto::{DashboardReport, StatusCounts};
use crate::model::quotation::QuotationStatus;
use crate::repository::client_repo::{ClientRepository, MongoClientRepository};
use crate::repository::quotation_repo::{MongoQuotationRepository, QuotationRepository};
use crate::util::error::ServiceError;

/// Recent quotations shown on the dashboard.
const RECENT_LIMIT: u32 = 5;

#[async_trait]
pub trait ReportService: Send + Sync {
    async fn dashboard(&self) -> Result<DashboardReport, ServiceError>;
}

pub struct ReportServiceImpl {
    pub quotation_repo: Arc<MongoQuotationRepository>,
    pub client_repo: Arc<MongoClientRepository>,
}

impl ReportServiceImpl {
    pub fn new(
        quotation_repo: Arc<MongoQuotationRepository>,
        client_repo: Arc<MongoClientRepository>,
    ) -> Self {
        Self {
            quotation_repo,
            client_repo,
        }
    }
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    #[instrument(skip(self))]
    async fn dashboard(&self) -> Result<DashboardReport, ServiceError> {
        info!("Building dashboard report");
        let total_clients = self.client_repo.count(None).await?;
        let total_quotations = self.quotation_repo.count(None).await?;

        let status_counts = StatusCounts {
            draft: self.quotation_repo.count_by_status(QuotationStatus::Draft).await?,
            sent: self.quotation_repo.count_by_status(QuotationStatus::Sent).await?,
            accepted: self.quotation_repo.count_by_status(QuotationStatus::Accepted).await?,
            rejected: self.quotation_repo.count_by_status(QuotationStatus::Rejected).await?,
            expired: self.quotation_repo.count_by_status(QuotationStatus::Expired).await?,
        };

        let accepted_total: Decimal = self
            .quotation_repo
            .list_by_status(QuotationStatus::Accepted)
            .await?
            .iter()
            .map(|q| q.total)
            .sum();

        let recent_quotations = self.quotation_repo.recent(RECENT_LIMIT).await?;

        Ok(DashboardReport {
            total_clients,
            total_quotations,
            status_counts,
            accepted_total,
            recent_quotations,
        })
    }
}
