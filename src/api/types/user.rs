//! Request and response bodies for the user endpoints

use serde::{Deserialize, Serialize};

use crate::domain::user::{SafeUser, UserId};

use super::error::ApiError;

/// Login request; both fields are checked for presence by the handler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Password change request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordApiRequest {
    #[serde(default, alias = "old_password")]
    pub old_password: Option<String>,
    #[serde(default, alias = "new_password")]
    pub new_password: Option<String>,
}

/// Standard success body: a message plus the payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            count: None,
        }
    }
}

impl DataResponse<Vec<SafeUser>> {
    /// List body; `count` mirrors the number of entries
    pub fn list(message: impl Into<String>, users: Vec<SafeUser>) -> Self {
        let count = users.len();
        Self {
            count: Some(count),
            ..Self::new(message, users)
        }
    }
}

/// User count body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub success: bool,
    pub message: String,
    pub total: usize,
}

/// Login success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub data: SafeUser,
    pub token: String,
}

/// Parse a path segment into a user id
pub fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse::<UserId>()
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("id"))
}

/// Collect the names of required fields that are absent or blank
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_none_or(|v| v.is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

/// Reject the request if any required field is missing
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), ApiError> {
    let missing = missing_fields(fields);

    if missing.is_empty() {
        return Ok(());
    }

    Err(
        ApiError::bad_request(format!("Missing required fields: {}", missing.join(", ")))
            .with_code("missing_fields"),
    )
}
