use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,

    #[validate(length(equal = 3))]
    pub currency: String,

    #[validate(range(min = 0.0, max = 100.0))]
    pub default_tax_rate: f64,

    #[validate(range(min = 1, max = 3650))]
    pub quotation_validity_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_settings() {
        let req = UpdateSettingsRequest {
            company_name: "Acme Ltd".to_string(),
            currency: "EUR".to_string(),
            default_tax_rate: 18.0,
            quotation_validity_days: 30,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_bad_currency_code() {
        let req = UpdateSettingsRequest {
            company_name: "Acme Ltd".to_string(),
            currency: "EURO".to_string(),
            default_tax_rate: 18.0,
            quotation_validity_days: 30,
        };
        assert!(req.validate().is_err());
    }
}
