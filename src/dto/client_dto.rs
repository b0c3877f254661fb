use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 3, max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[validate(length(max = 200))]
    pub company: Option<String>,
}

/// Full-replace update; the same shape as creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 3, max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[validate(length(max = 200))]
    pub company: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        let req = CreateClientRequest {
            name: "".to_string(),
            email: None,
            phone: None,
            address: None,
            company: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let req = CreateClientRequest {
            name: "Acme".to_string(),
            email: Some("not-an-email".to_string()),
            phone: None,
            address: None,
            company: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_minimal_client_accepted() {
        let req = CreateClientRequest {
            name: "Acme".to_string(),
            email: None,
            phone: None,
            address: None,
            company: None,
        };
        assert!(req.validate().is_ok());
    }
}
