use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::client_dto::{CreateClientRequest, UpdateClientRequest};
use crate::dto::ListQuery;
use crate::service::client_service::{ClientService, ClientServiceImpl};
use crate::util::error::HandlerError;

fn parse_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid client id"))
}

pub async fn create_client_handler(
    State(service): State<Arc<ClientServiceImpl>>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let created = service.create_client(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_client_handler(
    State(service): State<Arc<ClientServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let client = service.get_client(parse_id(&id)?).await?;
    Ok(Json(client))
}

pub async fn update_client_handler(
    State(service): State<Arc<ClientServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let updated = service.update_client(parse_id(&id)?, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_client_handler(
    State(service): State<Arc<ClientServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_client(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_clients_handler(
    State(service): State<Arc<ClientServiceImpl>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = query.page();
    let page_size = query.page_size();
    let clients = service.list_clients(page, page_size, query.q).await?;
    Ok(Json(clients))
}
