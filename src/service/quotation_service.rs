use async_trait::async_trait;
use bson::oid::ObjectId;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::dto::quotation_dto::{CreateQuotationRequest, QuotationItemDto, UpdateQuotationRequest};
use crate::dto::Paginated;
use crate::model::quotation::{Quotation, QuotationItem, QuotationStatus};
use crate::repository::client_repo::{ClientRepository, MongoClientRepository};
use crate::repository::counter_repo::{CounterRepository, MongoCounterRepository};
use crate::repository::quotation_repo::{MongoQuotationRepository, QuotationRepository};
use crate::repository::settings_repo::{MongoSettingsRepository, SettingsRepository};
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::util::error::ServiceError;
use crate::util::money::{decimal_from_f64, round_money};
use crate::util::numbering;
use crate::util::totals::{compute_totals, line_total};

#[async_trait]
pub trait QuotationService: Send + Sync {
    async fn create_quotation(
        &self,
        req: CreateQuotationRequest,
        created_by: ObjectId,
    ) -> Result<Quotation, ServiceError>;
    async fn get_quotation(&self, id: ObjectId) -> Result<Quotation, ServiceError>;
    async fn update_quotation(
        &self,
        id: ObjectId,
        req: UpdateQuotationRequest,
    ) -> Result<Quotation, ServiceError>;
    async fn update_status(&self, id: ObjectId, status: &str) -> Result<Quotation, ServiceError>;
    async fn delete_quotation(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn list_quotations(
        &self,
        page: u32,
        page_size: u32,
        q: Option<String>,
    ) -> Result<Paginated<Quotation>, ServiceError>;
}

pub struct QuotationServiceImpl {
    pub quotation_repo: Arc<MongoQuotationRepository>,
    pub client_repo: Arc<MongoClientRepository>,
    pub counter_repo: Arc<MongoCounterRepository>,
    pub settings_repo: Arc<MongoSettingsRepository>,
    pub user_repo: Arc<MongoUserRepository>,
}

impl QuotationServiceImpl {
    pub fn new(
        quotation_repo: Arc<MongoQuotationRepository>,
        client_repo: Arc<MongoClientRepository>,
        counter_repo: Arc<MongoCounterRepository>,
        settings_repo: Arc<MongoSettingsRepository>,
        user_repo: Arc<MongoUserRepository>,
    ) -> Self {
        Self {
            quotation_repo,
            client_repo,
            counter_repo,
            settings_repo,
            user_repo,
        }
    }

    fn parse_object_id(hex: &str, what: &str) -> Result<ObjectId, ServiceError> {
        ObjectId::parse_str(hex)
            .map_err(|_| ServiceError::InvalidInput(format!("Invalid {} ID: {}", what, hex)))
    }

    /// Converts API-edge float prices into decimals and derives line totals.
    fn items_from_dtos(dtos: &[QuotationItemDto]) -> Result<Vec<QuotationItem>, ServiceError> {
        dtos.iter()
            .map(|dto| {
                let unit_price = decimal_from_f64(dto.unit_price).map(round_money).ok_or_else(|| {
                    ServiceError::InvalidInput(format!(
                        "Unit price is not a finite number: {}",
                        dto.unit_price
                    ))
                })?;
                Ok(QuotationItem {
                    description: dto.description.clone(),
                    quantity: dto.quantity,
                    unit_price,
                    line_total: line_total(dto.quantity, unit_price),
                })
            })
            .collect()
    }

    fn decimal_field(value: f64, what: &str) -> Result<Decimal, ServiceError> {
        decimal_from_f64(value)
            .ok_or_else(|| ServiceError::InvalidInput(format!("{} is not a finite number: {}", what, value)))
    }

    /// Recomputes every derived field in place from the current items.
    fn recompute(quotation: &mut Quotation) {
        let totals = compute_totals(&quotation.items, quotation.tax_rate, quotation.discount);
        for item in &mut quotation.items {
            item.line_total = line_total(item.quantity, item.unit_price);
        }
        quotation.subtotal = totals.subtotal;
        quotation.tax_amount = totals.tax_amount;
        quotation.discount = totals.discount;
        quotation.total = totals.total;
    }

    /// Allocates the next `[INITIALS][DDMMYYYY]-[SEQ]` number for today.
    async fn allocate_number(&self, created_by: ObjectId) -> Result<String, ServiceError> {
        let user = self
            .user_repo
            .find_by_id(&created_by)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized(format!("Unknown user: {}", created_by)))?;
        let today = chrono::Utc::now().date_naive();
        let seq = self.counter_repo.next_sequence(today).await?;
        let initials = numbering::initials(&user.display_name(), &user.email);
        Ok(numbering::format_number(&initials, today, seq))
    }
}

#[async_trait]
impl QuotationService for QuotationServiceImpl {
    #[instrument(skip(self, req), fields(created_by = %created_by))]
    async fn create_quotation(
        &self,
        req: CreateQuotationRequest,
        created_by: ObjectId,
    ) -> Result<Quotation, ServiceError> {
        info!("Creating quotation");
        let client_id = Self::parse_object_id(&req.client_id, "client")?;
        // Reject dangling client references up front.
        self.client_repo.get_by_id(client_id).await?;

        let settings = self.settings_repo.get().await?;
        let tax_rate = match req.tax_rate {
            Some(rate) => Self::decimal_field(rate, "Tax rate")?,
            None => settings.default_tax_rate,
        };
        let discount = match req.discount {
            Some(d) => Self::decimal_field(d, "Discount")?,
            None => Decimal::ZERO,
        };
        let valid_until = req.valid_until.or_else(|| {
            let until = chrono::Utc::now()
                + chrono::Duration::days(i64::from(settings.quotation_validity_days));
            Some(until.to_rfc3339())
        });

        let number = self.allocate_number(created_by).await?;
        let mut quotation = Quotation {
            id: None,
            number,
            client_id,
            items: Self::items_from_dtos(&req.items)?,
            status: QuotationStatus::Draft,
            subtotal: Decimal::ZERO,
            tax_rate,
            tax_amount: Decimal::ZERO,
            discount,
            total: Decimal::ZERO,
            valid_until,
            notes: req.notes,
            created_at: None,
            updated_at: None,
        };
        Self::recompute(&mut quotation);

        let created = self.quotation_repo.create(quotation).await;
        match &created {
            Ok(q) => info!(number = %q.number, "Quotation created"),
            Err(e) => error!("Failed to create quotation: {e}"),
        }
        created.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_quotation(&self, id: ObjectId) -> Result<Quotation, ServiceError> {
        self.quotation_repo.get_by_id(id).await.map_err(ServiceError::from)
    }

    #[instrument(skip(self, req), fields(id = %id))]
    async fn update_quotation(
        &self,
        id: ObjectId,
        req: UpdateQuotationRequest,
    ) -> Result<Quotation, ServiceError> {
        info!("Updating quotation");
        let mut quotation = self.quotation_repo.get_by_id(id).await?;
        if quotation.status.is_terminal() {
            warn!(status = %quotation.status, "Rejected edit of terminal quotation");
            return Err(ServiceError::Conflict(format!(
                "Quotation {} is {} and can no longer be edited",
                quotation.number, quotation.status
            )));
        }

        if let Some(client_id) = &req.client_id {
            let client_id = Self::parse_object_id(client_id, "client")?;
            self.client_repo.get_by_id(client_id).await?;
            quotation.client_id = client_id;
        }
        if let Some(items) = &req.items {
            quotation.items = Self::items_from_dtos(items)?;
        }
        if let Some(rate) = req.tax_rate {
            quotation.tax_rate = Self::decimal_field(rate, "Tax rate")?;
        }
        if let Some(discount) = req.discount {
            quotation.discount = Self::decimal_field(discount, "Discount")?;
        }
        if let Some(valid_until) = req.valid_until {
            quotation.valid_until = Some(valid_until);
        }
        if let Some(notes) = req.notes {
            quotation.notes = Some(notes);
        }
        Self::recompute(&mut quotation);

        self.quotation_repo
            .update(id, quotation)
            .await
            .map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_status(&self, id: ObjectId, status: &str) -> Result<Quotation, ServiceError> {
        let next = QuotationStatus::from_str(status)
            .map_err(ServiceError::InvalidInput)?;
        let quotation = self.quotation_repo.get_by_id(id).await?;
        if !quotation.status.can_transition_to(next) {
            warn!(from = %quotation.status, to = %next, "Rejected status transition");
            return Err(ServiceError::Conflict(format!(
                "Cannot move quotation {} from {} to {}",
                quotation.number, quotation.status, next
            )));
        }
        // The repository re-checks the current status atomically, so a
        // concurrent transition between the read above and this write
        // surfaces as a conflict instead of a double transition.
        let updated = self
            .quotation_repo
            .update_status(id, quotation.status, next)
            .await?;
        info!(number = %updated.number, status = %updated.status, "Quotation status updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_quotation(&self, id: ObjectId) -> Result<(), ServiceError> {
        info!("Deleting quotation");
        self.quotation_repo.delete(id).await.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(page, page_size))]
    async fn list_quotations(
        &self,
        page: u32,
        page_size: u32,
        q: Option<String>,
    ) -> Result<Paginated<Quotation>, ServiceError> {
        let q = q.as_deref();
        let items = self.quotation_repo.list(page, page_size, q).await?;
        let total = self.quotation_repo.count(q).await?;
        Ok(Paginated {
            items,
            total,
            page,
            page_size,
        })
    }
}
