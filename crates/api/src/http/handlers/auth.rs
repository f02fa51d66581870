//! Registration and login

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::context::AppContext;
use crate::http::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::http::error::ApiResult;

/// `POST /api/auth/register`
pub async fn register(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let (principal, token) = ctx
        .identity
        .register(
            body.name.as_deref().unwrap_or(""),
            body.email.as_deref().unwrap_or(""),
            body.password.as_deref().unwrap_or(""),
            body.role.as_deref().unwrap_or(""),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new(&principal, token)),
    ))
}

/// `POST /api/auth/login`
pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (principal, token) = ctx
        .identity
        .login(
            body.email.as_deref().unwrap_or(""),
            body.password.as_deref().unwrap_or(""),
        )
        .await?;

    Ok(Json(AuthResponse::new(&principal, token)))
}
