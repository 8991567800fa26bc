//! HTTP request/response types shared by the handlers

pub mod error;
pub mod json;
pub mod user;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use user::{
    parse_user_id, require_fields, ChangePasswordApiRequest, CountResponse, DataResponse, LoginRequest,
    LoginResponse,
};
