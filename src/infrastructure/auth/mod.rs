//! Authentication infrastructure module
//!
//! This module provides the session token scheme handed out at login.

mod token;

pub use token::{DebugTokenIssuer, SessionTokens};
