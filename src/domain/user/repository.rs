//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewUser, SafeUser, User, UserId, UserPatch};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// A missing record is `Ok(None)`, never an error. Business rules such as
/// email uniqueness are enforced by the caller, not here.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user, assigning a fresh id and the creation time
    async fn create(&self, data: NewUser) -> Result<SafeUser, DomainError>;

    /// Get a user by id
    async fn find_by_id(&self, id: UserId) -> Result<Option<SafeUser>, DomainError>;

    /// Get a user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<SafeUser>, DomainError>;

    /// Get the full record (with password) by id, for credential checks
    async fn find_record_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get the full record (with password) by exact email, for credential checks
    async fn find_record_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check whether any live record has exactly this email
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    /// List all users in insertion order
    async fn find_all(&self) -> Result<Vec<SafeUser>, DomainError>;

    /// Number of live users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Replace name, email and password of a user
    async fn update_full(
        &self,
        id: UserId,
        data: NewUser,
    ) -> Result<Option<SafeUser>, DomainError>;

    /// Replace only the fields present in the patch
    async fn update_partial(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<Option<SafeUser>, DomainError>;

    /// Remove a user, returning its last state
    async fn delete(&self, id: UserId) -> Result<Option<SafeUser>, DomainError>;
}
