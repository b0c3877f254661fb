pub mod auth_handler;
pub mod client_handler;
pub mod quotation_handler;
pub mod settings_handler;
pub mod report_handler;
