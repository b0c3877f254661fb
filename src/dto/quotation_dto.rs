use serde::{Deserialize, Serialize};
use validator::Validate;

/// One line item as submitted by the client. Prices arrive as plain floats
/// at the API edge and are converted to fixed-point decimals before any
/// arithmetic or persistence. The upper bounds keep every reachable subtotal
/// far below `Decimal::MAX`, so the totals arithmetic cannot overflow.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuotationItemDto {
    #[validate(length(min = 1, max = 500))]
    pub description: String,

    #[validate(range(min = 1, max = 1_000_000))]
    pub quantity: u32,

    #[validate(range(min = 0.0, max = 1_000_000_000.0))]
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuotationRequest {
    /// Hex ObjectId of the client this quotation is addressed to.
    #[validate(length(equal = 24))]
    pub client_id: String,

    #[validate(length(min = 1, max = 200), nested)]
    pub items: Vec<QuotationItemDto>,

    /// Percentage (18 = 18%). Falls back to the settings default when absent.
    #[validate(range(min = 0.0, max = 100.0))]
    pub tax_rate: Option<f64>,

    #[validate(range(min = 0.0, max = 1_000_000_000.0))]
    pub discount: Option<f64>,

    pub valid_until: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Update replaces the full item list; absent fields keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateQuotationRequest {
    #[validate(length(equal = 24))]
    pub client_id: Option<String>,

    #[validate(length(min = 1, max = 200), nested)]
    pub items: Option<Vec<QuotationItemDto>>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub tax_rate: Option<f64>,

    #[validate(range(min = 0.0, max = 1_000_000_000.0))]
    pub discount: Option<f64>,

    pub valid_until: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateQuotationStatusRequest {
    #[validate(length(min = 2, max = 50))]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, unit_price: f64) -> QuotationItemDto {
        QuotationItemDto {
            description: "consulting".to_string(),
            quantity,
            unit_price,
        }
    }

    fn create_request(items: Vec<QuotationItemDto>) -> CreateQuotationRequest {
        CreateQuotationRequest {
            client_id: "507f1f77bcf86cd799439011".to_string(),
            items,
            tax_rate: Some(18.0),
            discount: None,
            valid_until: None,
            notes: None,
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        assert!(create_request(vec![]).validate().is_err());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(create_request(vec![item(0, 100.0)]).validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(create_request(vec![item(1, -5.0)]).validate().is_err());
    }

    #[test]
    fn test_valid_request_accepted() {
        assert!(create_request(vec![item(1, 5000.0), item(1, 1500.0)])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_malformed_client_id_rejected() {
        let mut req = create_request(vec![item(1, 100.0)]);
        req.client_id = "abc".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_tax_rate_over_100_rejected() {
        let mut req = create_request(vec![item(1, 100.0)]);
        req.tax_rate = Some(250.0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_extreme_values_rejected() {
        // Values this large would push the subtotal past what fixed-point
        // decimals can carry; the boundary rejects them instead.
        assert!(create_request(vec![item(4_000_000_000, 7e28)]).validate().is_err());
        assert!(create_request(vec![item(1, 7e28)]).validate().is_err());
        assert!(create_request(vec![item(4_000_000_000, 100.0)]).validate().is_err());
    }

    #[test]
    fn test_values_at_upper_bounds_accepted() {
        assert!(create_request(vec![item(1_000_000, 1_000_000_000.0)])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_oversized_discount_rejected() {
        let mut req = create_request(vec![item(1, 100.0)]);
        req.discount = Some(1e12);
        assert!(req.validate().is_err());
    }
}
