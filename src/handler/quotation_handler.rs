use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::quotation_dto::{
    CreateQuotationRequest, UpdateQuotationRequest, UpdateQuotationStatusRequest,
};
use crate::dto::ListQuery;
use crate::service::export_service::{ExportService, ExportServiceImpl};
use crate::service::quotation_service::{QuotationService, QuotationServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

#[derive(Clone)]
pub struct QuotationHandlerState {
    pub quotation_service: Arc<QuotationServiceImpl>,
    pub export_service: Arc<ExportServiceImpl>,
}

fn parse_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid quotation id"))
}

pub async fn create_quotation_handler(
    State(state): State<QuotationHandlerState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateQuotationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let created_by = ObjectId::parse_str(&claims.sub)
        .map_err(|_| HandlerError::bad_request("Invalid user id in token"))?;
    let created = state
        .quotation_service
        .create_quotation(payload, created_by)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_quotation_handler(
    State(state): State<QuotationHandlerState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotation = state.quotation_service.get_quotation(parse_id(&id)?).await?;
    Ok(Json(quotation))
}

pub async fn update_quotation_handler(
    State(state): State<QuotationHandlerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuotationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let updated = state
        .quotation_service
        .update_quotation(parse_id(&id)?, payload)
        .await?;
    Ok(Json(updated))
}

pub async fn update_quotation_status_handler(
    State(state): State<QuotationHandlerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuotationStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let updated = state
        .quotation_service
        .update_status(parse_id(&id)?, &payload.status)
        .await?;
    Ok(Json(updated))
}

pub async fn delete_quotation_handler(
    State(state): State<QuotationHandlerState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    state.quotation_service.delete_quotation(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_quotations_handler(
    State(state): State<QuotationHandlerState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = query.page();
    let page_size = query.page_size();
    let quotations = state
        .quotation_service
        .list_quotations(page, page_size, query.q)
        .await?;
    Ok(Json(quotations))
}

pub async fn export_quotations_handler(
    State(state): State<QuotationHandlerState>,
) -> Result<impl IntoResponse, HandlerError> {
    let csv = state.export_service.quotations_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"quotations.csv\"",
            ),
        ],
        csv,
    ))
}
