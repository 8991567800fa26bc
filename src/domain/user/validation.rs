//! User validation utilities
//!
//! Validation never fails hard: every check returns the list of problems found,
//! in the fixed order name, email, password.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::entity::{NewUser, UserPatch};

/// Minimum number of characters in a password
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("name is required")]
    NameRequired,

    #[error("email is required")]
    EmailRequired,

    #[error("invalid email format")]
    InvalidEmailFormat,

    #[error("password is required")]
    PasswordRequired,

    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    #[error("invalid user id: '{0}'")]
    InvalidId(String),
}

/// Validate a user name: must be non-empty after trimming
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::NameRequired);
    }

    Ok(())
}

/// Validate an email address against the `local@domain.tld` shape
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmailRequired);
    }

    if !is_valid_email_format(email) {
        return Err(UserValidationError::InvalidEmailFormat);
    }

    Ok(())
}

/// Validate a password: required, and at least [`MIN_PASSWORD_LENGTH`] UTF-16 code units
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.trim().is_empty() {
        return Err(UserValidationError::PasswordRequired);
    }

    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort);
    }

    Ok(())
}

pub fn is_valid_email_format(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate a complete record; all three fields are required
pub fn validate_new_user(user: &NewUser) -> Vec<UserValidationError> {
    collect_errors([
        Some(validate_name(&user.name)),
        Some(validate_email(&user.email)),
        Some(validate_password(&user.password)),
    ])
}

/// Validate only the fields present in a partial update
pub fn validate_patch(patch: &UserPatch) -> Vec<UserValidationError> {
    collect_errors([
        patch.name.as_deref().map(validate_name),
        patch.email.as_deref().map(validate_email),
        patch.password.as_deref().map(validate_password),
    ])
}

fn collect_errors<const N: usize>(
    checks: [Option<Result<(), UserValidationError>>; N],
) -> Vec<UserValidationError> {
    checks
        .into_iter()
        .flatten()
        .filter_map(Result::err)
        .collect()
}
