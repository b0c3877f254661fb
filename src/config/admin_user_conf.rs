use serde::{Deserialize, Serialize};
use std::env;

use crate::config::ConfigError;

/// First-admin bootstrap configuration.
///
/// The admin's first and last name also feed the quotation-number initials
/// for quotations created by that account. The password is optional; when
/// `ADMIN_PASSWORD` is unset a random one is generated at startup and logged
/// once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserConfig {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Option<String>,
}

impl AdminUserConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(AdminUserConfig {
            username: env::var("ADMIN_USERNAME")
                .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_USERNAME".to_string()))?,
            first_name: env::var("ADMIN_FIRST_NAME")
                .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_FIRST_NAME".to_string()))?,
            last_name: env::var("ADMIN_LAST_NAME")
                .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_LAST_NAME".to_string()))?,
            email: env::var("ADMIN_EMAIL")
                .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_EMAIL".to_string()))?,
            password: env::var("ADMIN_PASSWORD").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-global env vars are only touched once.
    #[test]
    fn test_password_is_optional() {
        env::set_var("ADMIN_USERNAME", "admin");
        env::set_var("ADMIN_FIRST_NAME", "Ada");
        env::set_var("ADMIN_LAST_NAME", "Lovelace");
        env::set_var("ADMIN_EMAIL", "admin@example.com");
        env::remove_var("ADMIN_PASSWORD");

        let config = AdminUserConfig::from_env().expect("config should load without a password");
        assert!(config.password.is_none());

        env::set_var("ADMIN_PASSWORD", "hunter2hunter2");
        let config = AdminUserConfig::from_env().unwrap();
        assert_eq!(config.password.as_deref(), Some("hunter2hunter2"));
        env::remove_var("ADMIN_PASSWORD");
    }
}
