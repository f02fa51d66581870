//! Error responses
//!
//! Maps [`TutoriumError`] onto HTTP status codes with a JSON body of the
//! shape `{"message": "..."}`. Infrastructure failures are logged and
//! collapsed to a generic message so internals never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tutorium_domain::TutoriumError;

use super::dto::MessageResponse;

/// Result alias used by all handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wrapper turning domain errors into HTTP responses
#[derive(Debug)]
pub struct ApiError(pub TutoriumError);

impl From<TutoriumError> for ApiError {
    fn from(err: TutoriumError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TutoriumError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            TutoriumError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            TutoriumError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            TutoriumError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            TutoriumError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            TutoriumError::Database(_) | TutoriumError::Config(_) | TutoriumError::Internal(_) => {
                tracing::error!(error = %self.0, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}
