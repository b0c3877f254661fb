pub mod jwt;
pub mod password;
pub mod logger;
pub mod error;
pub mod money;
pub mod totals;
pub mod numbering;
