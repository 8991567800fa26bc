//! User infrastructure module
//!
//! This module provides the in-memory user repository and the user service
//! that layers business rules on top of it.

mod repository;
mod service;

pub use repository::InMemoryUserRepository;
pub use service::{ChangePasswordRequest, LoginResult, UserService};
