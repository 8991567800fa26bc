//! User domain
//!
//! This module provides domain types and traits for user management,
//! including user entities, validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, SafeUser, User, UserId, UserPatch};
pub use repository::UserRepository;
pub use validation::{
    is_valid_email_format, validate_email, validate_name, validate_new_user, validate_password,
    validate_patch, UserValidationError, MIN_PASSWORD_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;
