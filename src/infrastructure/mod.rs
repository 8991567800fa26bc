//! Infrastructure layer - implementations of domain traits

pub mod auth;
pub mod logging;
pub mod user;
