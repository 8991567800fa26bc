//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Router,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    parse_user_id, require_fields, ApiError, ChangePasswordApiRequest, CountResponse,
    DataResponse, Json,
};
use crate::domain::user::{NewUser, SafeUser, UserPatch};
use crate::infrastructure::user::ChangePasswordRequest;

/// Create the user management router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/count", get(count_users))
        .route(
            "/{id}",
            get(get_user)
                .put(update_user)
                .patch(patch_user)
                .delete(delete_user),
        )
        .route("/{id}/password", patch(change_password))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<SafeUser>>>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.get_all().await?;

    Ok(Json(DataResponse::list("User list", users)))
}

/// GET /api/users/count
pub async fn count_users(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
    let total = state.user_service.count().await?;

    Ok(Json(CountResponse {
        success: true,
        message: "User count".to_string(),
        total,
    }))
}

/// POST /api/users
///
/// Same rules as registration, including email uniqueness.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<DataResponse<SafeUser>>), ApiError> {
    debug!(email = %request.email, "Creating user");

    let user = state.user_service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("User created", user)),
    ))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<SafeUser>>, ApiError> {
    let id = parse_user_id(&id)?;
    debug!(user_id = %id, "Getting user");

    let user = state.user_service.get_by_id(id).await?;

    Ok(Json(DataResponse::new("User details", user)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NewUser>,
) -> Result<Json<DataResponse<SafeUser>>, ApiError> {
    let id = parse_user_id(&id)?;
    debug!(user_id = %id, "Replacing user");

    let user = state.user_service.update_complete(id, request).await?;

    Ok(Json(DataResponse::new("User updated", user)))
}

/// PATCH /api/users/{id}
pub async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UserPatch>,
) -> Result<Json<DataResponse<SafeUser>>, ApiError> {
    let id = parse_user_id(&id)?;
    debug!(user_id = %id, "Patching user");

    if request.is_empty() {
        return Err(ApiError::bad_request("No data supplied for update").with_code("empty_update"));
    }

    let user = state.user_service.update_partial(id, request).await?;

    Ok(Json(DataResponse::new("User partially updated", user)))
}

/// PATCH /api/users/{id}/password
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChangePasswordApiRequest>,
) -> Result<Json<DataResponse<SafeUser>>, ApiError> {
    let id = parse_user_id(&id)?;
    debug!(user_id = %id, "Changing user password");

    require_fields(&[
        ("oldPassword", request.old_password.as_deref()),
        ("newPassword", request.new_password.as_deref()),
    ])?;

    let service_request = ChangePasswordRequest {
        old_password: request.old_password.unwrap_or_default(),
        new_password: request.new_password.unwrap_or_default(),
    };

    let user = state
        .user_service
        .change_password(id, service_request)
        .await?;

    Ok(Json(DataResponse::new("Password updated", user)))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<SafeUser>>, ApiError> {
    let id = parse_user_id(&id)?;
    debug!(user_id = %id, "Deleting user");

    let user = state.user_service.delete(id).await?;

    Ok(Json(DataResponse::new("User deleted", user)))
}
