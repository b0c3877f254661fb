pub mod user_service;
pub mod client_service;
pub mod quotation_service;
pub mod settings_service;
pub mod report_service;
pub mod export_service;
