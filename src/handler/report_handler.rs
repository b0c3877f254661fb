use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::service::report_service::{ReportService, ReportServiceImpl};
use crate::util::error::HandlerError;

pub async fn dashboard_handler(
    State(service): State<Arc<ReportServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let report = service.dashboard().await?;
    Ok(Json(report))
}
