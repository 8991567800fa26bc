//! User service for registration, login and user management

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::user::{
    validate_new_user, validate_password, validate_patch, NewUser, SafeUser, UserId, UserPatch,
    UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::auth::SessionTokens;

/// Request for changing a user's password
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Successful login: the user plus a session token
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: SafeUser,
    pub token: String,
}

/// User service enforcing validation, uniqueness and credential rules
///
/// Every mutating operation holds `write_lock` from its first check to its
/// final write, so two concurrent registrations can never both claim the same
/// email.
#[derive(Debug)]
pub struct UserService<R: UserRepository, T: SessionTokens> {
    repository: Arc<R>,
    tokens: Arc<T>,
    write_lock: Mutex<()>,
}

impl<R: UserRepository, T: SessionTokens> UserService<R, T> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, tokens: Arc<T>) -> Self {
        Self {
            repository,
            tokens,
            write_lock: Mutex::new(()),
        }
    }

    /// Register a new user
    pub async fn register(&self, input: NewUser) -> Result<SafeUser, DomainError> {
        ensure_valid(validate_new_user(&input))?;

        let _guard = self.write_lock.lock().await;

        if self.repository.email_exists(&input.email).await? {
            return Err(DomainError::email_taken(input.email));
        }

        let user = self.repository.create(input).await?;
        info!(user_id = %user.id, "Registered user");

        Ok(user)
    }

    /// Authenticate with email and password and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        let Some(user) = self.repository.find_record_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(DomainError::InvalidCredentials);
        };

        if !user.password_matches(password) {
            warn!(user_id = %user.id(), "Login attempt with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id());
        debug!(user_id = %user.id(), "User logged in");

        Ok(LoginResult {
            user: user.into(),
            token,
        })
    }

    /// Resolve a session token to the user it was issued for
    pub async fn verify_token(&self, token: &str) -> Result<SafeUser, DomainError> {
        let id = self.tokens.parse(token)?;
        self.get_by_id(id).await
    }

    /// Get a user by id
    pub async fn get_by_id(&self, id: UserId) -> Result<SafeUser, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    /// List all users
    pub async fn get_all(&self) -> Result<Vec<SafeUser>, DomainError> {
        self.repository.find_all().await
    }

    /// Number of registered users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Replace name, email and password of a user
    pub async fn update_complete(
        &self,
        id: UserId,
        input: NewUser,
    ) -> Result<SafeUser, DomainError> {
        ensure_valid(validate_new_user(&input))?;

        let _guard = self.write_lock.lock().await;

        self.get_by_id(id).await?;
        self.ensure_email_free_for(id, &input.email).await?;

        let user = self
            .repository
            .update_full(id, input)
            .await?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "Replaced user");

        Ok(user)
    }

    /// Update only the supplied fields of a user
    pub async fn update_partial(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<SafeUser, DomainError> {
        let _guard = self.write_lock.lock().await;

        self.get_by_id(id).await?;
        ensure_valid(validate_patch(&patch))?;

        if let Some(email) = patch.email.as_deref() {
            self.ensure_email_free_for(id, email).await?;
        }

        let user = self
            .repository
            .update_partial(id, patch)
            .await?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "Patched user");

        Ok(user)
    }

    /// Delete a user
    pub async fn delete(&self, id: UserId) -> Result<SafeUser, DomainError> {
        let _guard = self.write_lock.lock().await;

        let user = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "Deleted user");

        Ok(user)
    }

    /// Change a user's password after checking the current one
    pub async fn change_password(
        &self,
        id: UserId,
        request: ChangePasswordRequest,
    ) -> Result<SafeUser, DomainError> {
        let _guard = self.write_lock.lock().await;

        let user = self
            .repository
            .find_record_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))?;

        if !user.password_matches(&request.old_password) {
            warn!(user_id = %id, "Password change with wrong current password");
            return Err(DomainError::WrongPassword);
        }

        if request.new_password == request.old_password {
            return Err(DomainError::SamePassword);
        }

        validate_password(&request.new_password)
            .map_err(|e| DomainError::invalid_input([e]))?;

        let patch = UserPatch::default().with_password(request.new_password);
        let user = self
            .repository
            .update_partial(id, patch)
            .await?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "Changed user password");

        Ok(user)
    }

    /// Fail if `email` belongs to a user other than `id`
    async fn ensure_email_free_for(&self, id: UserId, email: &str) -> Result<(), DomainError> {
        match self.repository.find_by_email(email).await? {
            Some(owner) if owner.id != id => Err(DomainError::email_taken(email)),
            _ => Ok(()),
        }
    }
}

fn ensure_valid<E: ToString>(errors: Vec<E>) -> Result<(), DomainError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::invalid_input(errors))
    }
}

fn user_not_found(id: UserId) -> DomainError {
    DomainError::not_found(format!("User '{}' not found", id))
}
