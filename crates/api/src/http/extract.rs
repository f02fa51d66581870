//! Request extractors

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tutorium_domain::{Principal, TutoriumError};

use super::error::ApiError;
use crate::context::AppContext;

/// The authenticated caller, resolved from the `Authorization` header
///
/// Rejects with 401 when the header is missing, not a bearer scheme, or
/// the token does not verify.
#[derive(Debug, Clone)]
pub struct Identity(pub Principal);

impl FromRequestParts<Arc<AppContext>> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| TutoriumError::Unauthorized("No token provided".to_string()))?;

        let principal = state.identity.authenticate(token).await?;
        Ok(Self(principal))
    }
}
