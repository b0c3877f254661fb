use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;

use crate::handler::auth_handler::{
    login_handler, me_handler, refresh_token_handler, register_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::user_service::UserServiceImpl;

pub fn auth_router(
    service: Arc<UserServiceImpl>,
    auth_state: Arc<AuthState>,
    admin_auth_state: Arc<AdminAuthState>,
) -> Router {
    // Public routes
    let public = Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/refresh-token", post(refresh_token_handler));

    // Any authenticated user
    let authenticated = Router::new()
        .route("/auth/me", get(me_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    // Admin only
    let admin = Router::new()
        .route("/auth/register", post(register_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(authenticated).merge(admin).with_state(service)
}
