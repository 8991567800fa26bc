//! Session token generation and parsing
//!
//! Tokens have the shape `token_<user id>_<issue epoch millis>`. They carry no
//! signature and no expiry: anyone who knows a user id can forge one. Treat
//! this as a placeholder until real sessions are needed.

use std::fmt::Debug;

use chrono::{DateTime, Utc};

use crate::domain::user::UserId;
use crate::domain::DomainError;

const TOKEN_PREFIX: &str = "token";
const TOKEN_SEPARATOR: char = '_';

/// Trait for issuing and reading session tokens
pub trait SessionTokens: Send + Sync + Debug {
    /// Issue a token for a user
    fn issue(&self, user_id: UserId) -> String;

    /// Extract the user id from a token
    fn parse(&self, token: &str) -> Result<UserId, DomainError>;
}

/// Unsigned `token_<id>_<millis>` tokens
#[derive(Debug, Clone, Default)]
pub struct DebugTokenIssuer;

impl DebugTokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Issue a token with an explicit issue time
    pub fn issue_at(&self, user_id: UserId, issued_at: DateTime<Utc>) -> String {
        format!(
            "{TOKEN_PREFIX}{TOKEN_SEPARATOR}{}{TOKEN_SEPARATOR}{}",
            user_id,
            issued_at.timestamp_millis()
        )
    }
}

impl SessionTokens for DebugTokenIssuer {
    fn issue(&self, user_id: UserId) -> String {
        self.issue_at(user_id, Utc::now())
    }

    fn parse(&self, token: &str) -> Result<UserId, DomainError> {
        let parts: Vec<&str> = token.split(TOKEN_SEPARATOR).collect();

        let [prefix, id, issued_at] = parts.as_slice() else {
            return Err(DomainError::invalid_token("malformed token"));
        };

        if *prefix != TOKEN_PREFIX {
            return Err(DomainError::invalid_token("unexpected token prefix"));
        }

        if issued_at.parse::<i64>().is_err() {
            return Err(DomainError::invalid_token("malformed issue time"));
        }

        id.parse::<UserId>()
            .map_err(|_| DomainError::invalid_token("malformed user id"))
    }
}
