//! Authentication API endpoints
//!
//! Provides registration, login and token verification.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::debug;

use crate::api::middleware::RequireSession;
use crate::api::state::AppState;
use crate::api::types::{
    require_fields, ApiError, DataResponse, Json, LoginRequest, LoginResponse,
};
use crate::domain::user::{NewUser, SafeUser};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify", get(verify))
}

/// Register a new user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<DataResponse<SafeUser>>), ApiError> {
    debug!(email = %request.email, "Registering user");

    let user = state.user_service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("User registered successfully", user)),
    ))
}

/// Login with email and password
///
/// POST /api/auth/login
///
/// Returns the user and a session token on success.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    require_fields(&[
        ("email", request.email.as_deref()),
        ("password", request.password.as_deref()),
    ])?;

    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let result = state.user_service.login(&email, &password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        data: result.user,
        token: result.token,
    }))
}

/// Check a session token
///
/// GET /api/auth/verify
pub async fn verify(
    RequireSession(user): RequireSession,
) -> Result<Json<DataResponse<SafeUser>>, ApiError> {
    Ok(Json(DataResponse::new("Token is valid", user)))
}
