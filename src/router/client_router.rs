use axum::{middleware, routing::{delete, get, post, put}, Router};
use std::sync::Arc;

use crate::handler::client_handler::{
    create_client_handler, delete_client_handler, get_client_handler, list_clients_handler,
    update_client_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::client_service::ClientServiceImpl;

pub fn client_router(service: Arc<ClientServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/clients", get(list_clients_handler))
        .route("/clients", post(create_client_handler))
        .route("/clients/{id}", get(get_client_handler))
        .route("/clients/{id}", put(update_client_handler))
        .route("/clients/{id}", delete(delete_client_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(service)
}
