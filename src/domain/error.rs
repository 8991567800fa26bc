use thiserror::Error;

/// Core domain errors
///
/// Only the service layer produces the business variants. Repositories report
/// a missing record as `Ok(None)` and use `Storage` for backend faults.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {}", .errors.join(", "))]
    InvalidInput { errors: Vec<String> },

    #[error("Email '{email}' is already registered")]
    EmailTaken { email: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("New password must be different from the current password")]
    SamePassword,

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_input<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::InvalidInput {
            errors: errors.into_iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::EmailTaken {
            email: email.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::EmailTaken { .. } => "email_taken",
            Self::NotFound { .. } => "not_found",
            Self::InvalidCredentials => "invalid_credentials",
            Self::WrongPassword => "wrong_password",
            Self::SamePassword => "same_password",
            Self::InvalidToken { .. } => "invalid_token",
            Self::Storage { .. } => "storage_error",
            Self::Internal { .. } => "internal_error",
        }
    }
}
