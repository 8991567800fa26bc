//! Session token extraction for endpoints that need a logged-in user

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::SafeUser;

/// Extractor that requires a valid session token
///
/// Reads the token from the `Authorization: Bearer <token>` header and resolves
/// it to the user it was issued for.
#[derive(Debug, Clone)]
pub struct RequireSession(pub SafeUser);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Validating session token");

        let user = state
            .user_service
            .verify_token(&token)
            .await
            .map_err(ApiError::from)?;

        Ok(RequireSession(user))
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authorization token required. Provide it via 'Authorization: Bearer <token>' header",
    ))
}
