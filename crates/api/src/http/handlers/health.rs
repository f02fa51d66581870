//! Service banner and health probe

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::context::{AppContext, HealthReport};

/// `GET /`
pub async fn banner() -> &'static str {
    "Tutorium office-hours scheduling service"
}

/// `GET /health`
///
/// 200 when every component is healthy, 503 otherwise.
pub async fn health(State(ctx): State<Arc<AppContext>>) -> (StatusCode, Json<HealthReport>) {
    let report = ctx.health_check().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
