//! DevConnect API
//!
//! Backend for a developer community site:
//! - Account registration and bearer-token login
//! - Developer profiles with experience, education and social links
//! - A post feed with likes and comments
//! - Latest GitHub repositories for a profile

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use api::state::AppState;
use domain::storage::UniqueClaim;
use domain::{Post, Profile, User};
use infrastructure::{
    auth::{Argon2Hasher, JwtConfig, JwtService},
    github::GitHubClient,
    post::{PostService, StoragePostRepository},
    profile::{ProfileService, StorageProfileRepository},
    storage::StorageBackend,
    user::{StorageUserRepository, UserService},
};

/// Create the application state with default configuration (in-memory storage)
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage = StorageBackend::connect(&config.storage.to_storage_config()?).await?;
    info!(backend = %storage.storage_type(), "Storage backend ready");

    let users = Arc::new(StorageUserRepository::new(
        storage.collection::<User>("users").await?,
        storage.collection::<UniqueClaim>("user_emails").await?,
    ));
    let profiles = Arc::new(StorageProfileRepository::new(
        storage.collection::<Profile>("profiles").await?,
        storage.collection::<UniqueClaim>("profile_handles").await?,
    ));
    let posts = Arc::new(StoragePostRepository::new(
        storage.collection::<Post>("posts").await?,
    ));

    let tokens = Arc::new(create_jwt_service(config));
    let user_service = UserService::new(users.clone(), Arc::new(Argon2Hasher::new()), tokens);
    let profile_service = ProfileService::new(profiles, users);
    let post_service = PostService::new(posts);
    let github = GitHubClient::new((&config.github).into())?;

    Ok(AppState {
        user_service: Arc::new(user_service),
        profile_service: Arc::new(profile_service),
        post_service: Arc::new(post_service),
        github: Arc::new(github),
        storage,
    })
}

/// Generate a random secret for JWT signing
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Create JWT service from secret (config, env var, or random)
fn create_jwt_service(config: &AppConfig) -> JwtService {
    let jwt_secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            warn!(
                "No JWT secret configured. Generating random secret. \
                Issued tokens will NOT survive a restart. \
                Set APP__AUTH__JWT_SECRET or JWT_SECRET for persistent sessions."
            );
            generate_random_secret()
        });

    JwtService::new(JwtConfig::new(jwt_secret, config.auth.token_ttl_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::StorageType;

    #[test]
    fn test_generate_random_secret() {
        let secret = generate_random_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(secret, generate_random_secret());
    }

    #[tokio::test]
    async fn test_create_app_state_in_memory() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.storage.storage_type(), StorageType::InMemory);
        assert!(state.storage.ping().await.is_ok());
        assert!(state.post_service.list().await.unwrap().is_empty());
    }
}
