use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::handler::report_handler::dashboard_handler;
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::report_service::ReportServiceImpl;

pub fn report_router(service: Arc<ReportServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/reports/dashboard", get(dashboard_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(service)
}
