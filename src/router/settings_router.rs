use axum::{middleware, routing::{get, put}, Router};
use std::sync::Arc;

use crate::handler::settings_handler::{get_settings_handler, update_settings_handler};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::settings_service::SettingsServiceImpl;

pub fn settings_router(
    service: Arc<SettingsServiceImpl>,
    auth_state: Arc<AuthState>,
    admin_auth_state: Arc<AdminAuthState>,
) -> Router {
    // Any authenticated user can read the settings
    let read = Router::new()
        .route("/settings", get(get_settings_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    // Writes are admin only
    let write = Router::new()
        .route("/settings", put(update_settings_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    read.merge(write).with_state(service)
}
