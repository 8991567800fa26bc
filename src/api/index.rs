//! Root endpoint describing the available routes

use axum::response::IntoResponse;
use serde_json::json;

use crate::api::types::Json;

/// GET /
pub async fn api_index() -> impl IntoResponse {
    Json(json!({
        "message": "User Registry API running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "register": "POST /api/auth/register",
            "login": "POST /api/auth/login",
            "verify": "GET /api/auth/verify",
            "listUsers": "GET /api/users",
            "countUsers": "GET /api/users/count",
            "createUser": "POST /api/users",
            "getUser": "GET /api/users/{id}",
            "updateUserComplete": "PUT /api/users/{id}",
            "updateUserPartial": "PATCH /api/users/{id}",
            "changePassword": "PATCH /api/users/{id}/password",
            "deleteUser": "DELETE /api/users/{id}"
        }
    }))
}
