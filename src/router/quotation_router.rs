use axum::{middleware, routing::{delete, get, post, put}, Router};
use std::sync::Arc;

use crate::handler::quotation_handler::{
    create_quotation_handler, delete_quotation_handler, export_quotations_handler,
    get_quotation_handler, list_quotations_handler, update_quotation_handler,
    update_quotation_status_handler, QuotationHandlerState,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState};

pub fn quotation_router(state: QuotationHandlerState, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/quotations", get(list_quotations_handler))
        .route("/quotations", post(create_quotation_handler))
        .route("/quotations/export", get(export_quotations_handler))
        .route("/quotations/{id}", get(get_quotation_handler))
        .route("/quotations/{id}", put(update_quotation_handler))
        .route("/quotations/{id}", delete(delete_quotation_handler))
        .route("/quotations/{id}/status", put(update_quotation_status_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(state)
}
