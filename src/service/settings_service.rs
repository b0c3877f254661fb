use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::dto::settings_dto::UpdateSettingsRequest;
use crate::model::settings::Settings;
use crate::repository::settings_repo::{MongoSettingsRepository, SettingsRepository};
use crate::util::error::ServiceError;
use crate::util::money::decimal_from_f64;

#[async_trait]
pub trait SettingsService: Send + Sync {
    async fn get_settings(&self) -> Result<Settings, ServiceError>;
    async fn update_settings(&self, req: UpdateSettingsRequest) -> Result<Settings, ServiceError>;
}

pub struct SettingsServiceImpl {
    pub settings_repo: Arc<MongoSettingsRepository>,
}

impl SettingsServiceImpl {
    pub fn new(settings_repo: Arc<MongoSettingsRepository>) -> Self {
        Self { settings_repo }
    }
}

#[async_trait]
impl SettingsService for SettingsServiceImpl {
    #[instrument(skip(self))]
    async fn get_settings(&self) -> Result<Settings, ServiceError> {
        self.settings_repo.get().await.map_err(ServiceError::from)
    }

    #[instrument(skip(self, req))]
    async fn update_settings(&self, req: UpdateSettingsRequest) -> Result<Settings, ServiceError> {
        info!("Updating settings");
        let default_tax_rate: Decimal = decimal_from_f64(req.default_tax_rate).ok_or_else(|| {
            ServiceError::InvalidInput(format!(
                "Tax rate is not a finite number: {}",
                req.default_tax_rate
            ))
        })?;
        let current = self.settings_repo.get().await?;
        let settings = Settings {
            id: current.id,
            company_name: req.company_name,
            currency: req.currency.to_uppercase(),
            default_tax_rate,
            quotation_validity_days: req.quotation_validity_days,
            updated_at: current.updated_at,
        };
        self.settings_repo
            .upsert(settings)
            .await
            .map_err(ServiceError::from)
    }
}
