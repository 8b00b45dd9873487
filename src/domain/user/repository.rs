//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Looks a user up by email (exact match on the stored, trimmed value)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Returns true if a user was removed
    async fn delete_by_id(&self, id: &UserId) -> Result<bool, DomainError>;
}
