pub mod auth_router;
pub mod client_router;
pub mod quotation_router;
pub mod settings_router;
pub mod report_router;
