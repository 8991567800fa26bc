//! User Registry API
//!
//! A small user management service with:
//! - Registration and login with session tokens
//! - Full and partial updates, password changes and deletion
//! - An in-memory store with an optional seed record

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::bail;
use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

use api::state::AppState;
use config::SeedConfig;
use domain::user::{validate_new_user, NewUser, User, UserId};
use infrastructure::{auth::DebugTokenIssuer, user::InMemoryUserRepository, user::UserService};

/// Build the application state from configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = Arc::new(create_user_repository(&config.seed)?);
    let tokens = Arc::new(DebugTokenIssuer::new());
    let user_service = Arc::new(UserService::new(repository, tokens));

    Ok(AppState::new(user_service))
}

/// Create the user store, seeded with one record when enabled
fn create_user_repository(seed: &SeedConfig) -> anyhow::Result<InMemoryUserRepository> {
    if !seed.enabled {
        info!("Starting with an empty user store");
        return Ok(InMemoryUserRepository::new());
    }

    let new_user = NewUser::new(&seed.name, &seed.email, &seed.password);
    let errors = validate_new_user(&new_user);

    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        bail!("Invalid seed user: {}", messages.join(", "));
    }

    let user = User::with_created_at(UserId::new(1), new_user, seed_created_at());
    info!(email = %seed.email, "Seeding user store");

    Ok(InMemoryUserRepository::with_users(vec![user]))
}

fn seed_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_with_seed() {
        let state = create_app_state(&AppConfig::default()).unwrap();

        let users = state.user_service.get_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, UserId::new(1));
        assert_eq!(users[0].name, "Admin");

        let login = state
            .user_service
            .login("admin@email.com", "123456")
            .await
            .unwrap();
        assert!(login.token.starts_with("token_1_"));
    }

    #[tokio::test]
    async fn test_create_app_state_without_seed() {
        let mut config = AppConfig::default();
        config.seed.enabled = false;

        let state = create_app_state(&config).unwrap();
        assert!(state.user_service.get_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let mut config = AppConfig::default();
        config.seed.email = "not-an-email".to_string();

        let err = create_app_state(&config).err().unwrap();
        assert!(err.to_string().contains("invalid email format"));
    }
}
