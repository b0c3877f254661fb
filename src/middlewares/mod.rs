pub mod auth_middleware;
pub mod admin_middleware;
