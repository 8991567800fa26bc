//! Domain layer - entities, validation rules and repository traits

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{NewUser, SafeUser, User, UserId, UserPatch, UserRepository};
