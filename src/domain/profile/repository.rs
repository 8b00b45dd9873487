//! Profile repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Education, Experience, Profile, ProfileFields};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for profile storage
///
/// Nested list mutations fail with `NotFound` when the user has no profile and
/// with `Concurrency` when the profile changed between read and write.
#[async_trait]
pub trait ProfileRepository: Send + Sync + Debug {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Profile>, DomainError>;

    /// Creates the profile or merges the supplied fields into the existing one.
    ///
    /// Creating with a handle another user already holds fails with `DuplicateHandle`.
    async fn upsert(&self, user_id: &UserId, fields: ProfileFields) -> Result<Profile, DomainError>;

    /// Prepends an experience entry
    async fn append_experience(
        &self,
        user_id: &UserId,
        experience: Experience,
    ) -> Result<Profile, DomainError>;

    /// Prepends an education entry
    async fn append_education(
        &self,
        user_id: &UserId,
        education: Education,
    ) -> Result<Profile, DomainError>;

    /// Removes the experience entry with the given id, if any
    async fn remove_experience(&self, user_id: &UserId, exp_id: &str) -> Result<Profile, DomainError>;

    /// Removes the education entry with the given id, if any
    async fn remove_education(&self, user_id: &UserId, edu_id: &str) -> Result<Profile, DomainError>;

    async fn delete_by_user_id(&self, user_id: &UserId) -> Result<bool, DomainError>;
}
