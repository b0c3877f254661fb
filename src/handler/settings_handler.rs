use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::settings_dto::UpdateSettingsRequest;
use crate::service::settings_service::{SettingsService, SettingsServiceImpl};
use crate::util::error::HandlerError;

pub async fn get_settings_handler(
    State(service): State<Arc<SettingsServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let settings = service.get_settings().await?;
    Ok(Json(settings))
}

pub async fn update_settings_handler(
    State(service): State<Arc<SettingsServiceImpl>>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let settings = service.update_settings(payload).await?;
    Ok(Json(settings))
}
