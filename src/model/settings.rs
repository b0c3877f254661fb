use bson::oid::ObjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Application-wide settings, stored as a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub company_name: String,
    /// ISO 4217 currency code, display only.
    pub currency: String,
    /// Default tax rate as a percentage (18 = 18%).
    pub default_tax_rate: Decimal,
    /// Days a new quotation stays valid when no date is given.
    pub quotation_validity_days: u32,
    pub updated_at: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            id: None,
            company_name: "My Company".to_string(),
            currency: "USD".to_string(),
            default_tax_rate: Decimal::from(18),
            quotation_validity_days: 30,
            updated_at: None,
        }
    }
}
