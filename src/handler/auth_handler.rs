use axum::{
    extract::{Json, State},
    response::IntoResponse,
    Extension,
};
use bson::oid::ObjectId;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::model::user::User;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 2, max = 32))]
    pub first_name: String,
    #[validate(length(min = 2, max = 32))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Defaults to `user`; only `admin` and `user` are accepted.
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 10))]
    pub refresh_token: String,
}

// Register (admin only)
pub async fn register_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let role = match payload.role.as_deref() {
        None | Some("user") => "user",
        Some("admin") => "admin",
        Some(other) => {
            return Err(HandlerError::bad_request(format!("Unknown role: {}", other)));
        }
    };
    let user = User {
        id: None,
        username: payload.username,
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        password_hash: String::new(),
        role: role.to_string(),
        created_at: None,
        updated_at: None,
    };
    let res = service.register(user, payload.password).await?;
    Ok((axum::http::StatusCode::CREATED, Json(res)))
}

// Login
pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let res = service.login(payload.email, payload.password).await?;
    Ok(Json(res))
}

// Refresh Token
pub async fn refresh_token_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }
    let res = service.refresh_token(payload.refresh_token).await?;
    Ok(Json(res))
}

// Current user, from the bearer token claims
pub async fn me_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&claims.sub)
        .map_err(|_| HandlerError::bad_request("Invalid user id in token"))?;
    let res = service.get_user(id).await?;
    Ok(Json(res))
}
