//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{NewUser, SafeUser, UserId, UserPatch, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::SessionTokens;
use crate::infrastructure::user::{ChangePasswordRequest, LoginResult, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, input: NewUser) -> Result<SafeUser, DomainError>;
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError>;
    async fn verify_token(&self, token: &str) -> Result<SafeUser, DomainError>;
    async fn get_by_id(&self, id: UserId) -> Result<SafeUser, DomainError>;
    async fn get_all(&self) -> Result<Vec<SafeUser>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
    async fn update_complete(&self, id: UserId, input: NewUser) -> Result<SafeUser, DomainError>;
    async fn update_partial(&self, id: UserId, patch: UserPatch)
        -> Result<SafeUser, DomainError>;
    async fn delete(&self, id: UserId) -> Result<SafeUser, DomainError>;
    async fn change_password(
        &self,
        id: UserId,
        request: ChangePasswordRequest,
    ) -> Result<SafeUser, DomainError>;
}

#[async_trait::async_trait]
impl<R, T> UserServiceTrait for UserService<R, T>
where
    R: UserRepository + 'static,
    T: SessionTokens + 'static,
{
    async fn register(&self, input: NewUser) -> Result<SafeUser, DomainError> {
        UserService::register(self, input).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        UserService::login(self, email, password).await
    }

    async fn verify_token(&self, token: &str) -> Result<SafeUser, DomainError> {
        UserService::verify_token(self, token).await
    }

    async fn get_by_id(&self, id: UserId) -> Result<SafeUser, DomainError> {
        UserService::get_by_id(self, id).await
    }

    async fn get_all(&self) -> Result<Vec<SafeUser>, DomainError> {
        UserService::get_all(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }

    async fn update_complete(&self, id: UserId, input: NewUser) -> Result<SafeUser, DomainError> {
        UserService::update_complete(self, id, input).await
    }

    async fn update_partial(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<SafeUser, DomainError> {
        UserService::update_partial(self, id, patch).await
    }

    async fn delete(&self, id: UserId) -> Result<SafeUser, DomainError> {
        UserService::delete(self, id).await
    }

    async fn change_password(
        &self,
        id: UserId,
        request: ChangePasswordRequest,
    ) -> Result<SafeUser, DomainError> {
        UserService::change_password(self, id, request).await
    }
}
