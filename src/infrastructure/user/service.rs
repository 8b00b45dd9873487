//! User service for registration, login and token resolution

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::{gravatar_url, PasswordHasher, TokenClaims, TokenError, TokenService};

/// Registration payload, read after validation
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login payload, read after validation
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User service for authentication and account management
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher, T: TokenService> {
    repository: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R: UserRepository, H: PasswordHasher, T: TokenService> UserService<R, H, T> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Creates an account; the email must not be registered yet
    ///
    /// The early lookup only saves a hash on the common path. The repository
    /// insert is what rejects a concurrent registration of the same email.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        let email = request.email.trim();
        debug!(email = %email, "Registering user");

        if self.repository.find_by_email(email).await?.is_some() {
            return Err(DomainError::DuplicateIdentity);
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(request.name.trim(), email, gravatar_url(email), password_hash);
        let user = self.repository.create(user).await?;

        info!(user_id = %user.id(), "User registered");
        Ok(user)
    }

    /// Checks credentials and returns a bearer token
    pub async fn login(&self, request: LoginRequest) -> Result<String, DomainError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| DomainError::not_found("email", "User not found"))?;

        if !self.hasher.verify(&request.password, user.password_hash()) {
            debug!(user_id = %user.id(), "Password mismatch");
            return Err(DomainError::field("password", "Password incorrect"));
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id(), "User logged in");

        Ok(format!("Bearer {}", token))
    }

    pub async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.repository.find_by_id(id).await
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.tokens.verify(token)
    }
}
