//! Application state for shared services

use std::sync::Arc;

use crate::domain::post::PostRepository;
use crate::domain::profile::ProfileRepository;
use crate::domain::user::UserRepository;
use crate::domain::{DomainError, Post, PostId, Profile, User, UserId};
use crate::infrastructure::auth::{PasswordHasher, TokenClaims, TokenError, TokenService};
use crate::infrastructure::github::GitHubClientTrait;
use crate::infrastructure::post::{PostRequest, PostService};
use crate::infrastructure::profile::{
    EducationRequest, ExperienceRequest, PopulatedProfile, ProfileRequest, ProfileService,
};
use crate::infrastructure::storage::StorageBackend;
use crate::infrastructure::user::{LoginRequest, RegisterRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub profile_service: Arc<dyn ProfileServiceTrait>,
    pub post_service: Arc<dyn PostServiceTrait>,
    pub github: Arc<dyn GitHubClientTrait>,
    pub storage: StorageBackend,
}

/// Trait for account and credential operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError>;
    /// Returns the `Bearer <jwt>` string on success
    async fn login(&self, request: LoginRequest) -> Result<String, DomainError>;
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;
    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
}

/// Trait for profile operations
#[async_trait::async_trait]
pub trait ProfileServiceTrait: Send + Sync {
    async fn get_by_user(&self, user_id: &UserId) -> Result<PopulatedProfile, DomainError>;
    async fn get_by_handle(&self, handle: &str) -> Result<PopulatedProfile, DomainError>;
    async fn list(&self) -> Result<Vec<PopulatedProfile>, DomainError>;
    async fn upsert(&self, user_id: &UserId, request: ProfileRequest) -> Result<Profile, DomainError>;
    async fn add_experience(
        &self,
        user_id: &UserId,
        request: ExperienceRequest,
    ) -> Result<Profile, DomainError>;
    async fn add_education(
        &self,
        user_id: &UserId,
        request: EducationRequest,
    ) -> Result<Profile, DomainError>;
    async fn remove_experience(&self, user_id: &UserId, exp_id: &str) -> Result<Profile, DomainError>;
    async fn remove_education(&self, user_id: &UserId, edu_id: &str) -> Result<Profile, DomainError>;
    async fn delete_account(&self, user_id: &UserId) -> Result<(), DomainError>;
}

/// Trait for post operations
#[async_trait::async_trait]
pub trait PostServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Post>, DomainError>;
    async fn get(&self, id: &PostId) -> Result<Post, DomainError>;
    async fn create(&self, author: &UserId, request: PostRequest) -> Result<Post, DomainError>;
    async fn delete(&self, id: &PostId, requester: &UserId) -> Result<(), DomainError>;
    async fn like(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError>;
    async fn unlike(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError>;
    async fn comment(
        &self,
        id: &PostId,
        author: &UserId,
        request: PostRequest,
    ) -> Result<Post, DomainError>;
    async fn delete_comment(
        &self,
        id: &PostId,
        comment_id: &str,
        requester: &UserId,
    ) -> Result<Post, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H, T> UserServiceTrait for UserService<R, H, T>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenService + 'static,
{
    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        UserService::register(self, request).await
    }

    async fn login(&self, request: LoginRequest) -> Result<String, DomainError> {
        UserService::login(self, request).await
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        UserService::verify_token(self, token)
    }
}

#[async_trait::async_trait]
impl<R, U> ProfileServiceTrait for ProfileService<R, U>
where
    R: ProfileRepository + 'static,
    U: UserRepository + 'static,
{
    async fn get_by_user(&self, user_id: &UserId) -> Result<PopulatedProfile, DomainError> {
        ProfileService::get_by_user(self, user_id).await
    }

    async fn get_by_handle(&self, handle: &str) -> Result<PopulatedProfile, DomainError> {
        ProfileService::get_by_handle(self, handle).await
    }

    async fn list(&self) -> Result<Vec<PopulatedProfile>, DomainError> {
        ProfileService::list(self).await
    }

    async fn upsert(&self, user_id: &UserId, request: ProfileRequest) -> Result<Profile, DomainError> {
        ProfileService::upsert(self, user_id, request).await
    }

    async fn add_experience(
        &self,
        user_id: &UserId,
        request: ExperienceRequest,
    ) -> Result<Profile, DomainError> {
        ProfileService::add_experience(self, user_id, request).await
    }

    async fn add_education(
        &self,
        user_id: &UserId,
        request: EducationRequest,
    ) -> Result<Profile, DomainError> {
        ProfileService::add_education(self, user_id, request).await
    }

    async fn remove_experience(&self, user_id: &UserId, exp_id: &str) -> Result<Profile, DomainError> {
        ProfileService::remove_experience(self, user_id, exp_id).await
    }

    async fn remove_education(&self, user_id: &UserId, edu_id: &str) -> Result<Profile, DomainError> {
        ProfileService::remove_education(self, user_id, edu_id).await
    }

    async fn delete_account(&self, user_id: &UserId) -> Result<(), DomainError> {
        ProfileService::delete_account(self, user_id).await
    }
}

#[async_trait::async_trait]
impl<R: PostRepository + 'static> PostServiceTrait for PostService<R> {
    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        PostService::list(self).await
    }

    async fn get(&self, id: &PostId) -> Result<Post, DomainError> {
        PostService::get(self, id).await
    }

    async fn create(&self, author: &UserId, request: PostRequest) -> Result<Post, DomainError> {
        PostService::create(self, author, request).await
    }

    async fn delete(&self, id: &PostId, requester: &UserId) -> Result<(), DomainError> {
        PostService::delete(self, id, requester).await
    }

    async fn like(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError> {
        PostService::like(self, id, user_id).await
    }

    async fn unlike(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError> {
        PostService::unlike(self, id, user_id).await
    }

    async fn comment(
        &self,
        id: &PostId,
        author: &UserId,
        request: PostRequest,
    ) -> Result<Post, DomainError> {
        PostService::comment(self, id, author, request).await
    }

    async fn delete_comment(
        &self,
        id: &PostId,
        comment_id: &str,
        requester: &UserId,
    ) -> Result<Post, DomainError> {
        PostService::delete_comment(self, id, comment_id, requester).await
    }
}
