pub mod user;
pub mod client;
pub mod quotation;
pub mod settings;
