//! Storage-backed profile repository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::profile::{Education, Experience, Profile, ProfileFields, ProfileRepository};
use crate::domain::storage::{ClaimValue, Storage, UniqueClaim};
use crate::domain::user::UserId;
use crate::domain::DomainError;

pub(crate) fn no_profile() -> DomainError {
    DomainError::not_found("noprofile", "There is no profile for this user")
}

/// Storage-backed implementation of ProfileRepository
///
/// Profiles are keyed by their owner's id, so a user can never hold two.
/// Handles are reserved in a claim collection before the profile is written.
#[derive(Debug)]
pub struct StorageProfileRepository {
    storage: Arc<dyn Storage<Profile>>,
    handles: Arc<dyn Storage<UniqueClaim>>,
}

impl StorageProfileRepository {
    pub fn new(storage: Arc<dyn Storage<Profile>>, handles: Arc<dyn Storage<UniqueClaim>>) -> Self {
        Self { storage, handles }
    }

    /// Read-modify-write guarded by the profile version
    async fn modify<F>(&self, user_id: &UserId, change: F) -> Result<Profile, DomainError>
    where
        F: FnOnce(&mut Profile) + Send,
    {
        let mut profile = self.storage.get(user_id).await?.ok_or_else(no_profile)?;
        let expected_version = profile.version;

        change(&mut profile);
        profile.version = expected_version + 1;

        self.storage.update_versioned(profile, expected_version).await
    }

    /// Reserves `handle` for the user. Returns true when this call made the
    /// claim, false when the user already held it.
    async fn claim_handle(&self, handle: &str, user_id: &UserId) -> Result<bool, DomainError> {
        match self
            .handles
            .create(UniqueClaim::new(handle, user_id.as_str()))
            .await
        {
            Ok(_) => Ok(true),
            Err(DomainError::Concurrency { .. }) => {
                let holder = self.handles.get(&ClaimValue::new(handle)).await?;
                match holder {
                    Some(claim) if claim.owner() == user_id.as_str() => Ok(false),
                    Some(_) => Err(DomainError::DuplicateHandle),
                    None => Err(DomainError::concurrency(format!(
                        "Handle '{}' changed hands during the update",
                        handle
                    ))),
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn release_handle(&self, handle: &str) {
        if let Err(e) = self.handles.delete(&ClaimValue::new(handle)).await {
            warn!(handle = %handle, error = %e, "Failed to release handle claim");
        }
    }

    async fn write(
        &self,
        existing: Option<Profile>,
        user_id: &UserId,
        fields: ProfileFields,
    ) -> Result<Profile, DomainError> {
        match existing {
            Some(mut profile) => {
                let expected_version = profile.version;
                profile.merge(fields);
                profile.version = expected_version + 1;

                self.storage.update_versioned(profile, expected_version).await
            }
            None => {
                self.storage
                    .create(Profile::create(user_id.clone(), fields))
                    .await
            }
        }
    }
}

#[async_trait]
impl ProfileRepository for StorageProfileRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        self.storage.get(user_id).await
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>, DomainError> {
        let Some(claim) = self.handles.get(&ClaimValue::new(handle)).await? else {
            return Ok(None);
        };

        let profile = self.storage.get(&UserId::new(claim.owner())).await?;
        Ok(profile.filter(|profile| profile.handle == handle))
    }

    async fn find_all(&self) -> Result<Vec<Profile>, DomainError> {
        let mut profiles = self.storage.list().await?;
        profiles.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(profiles)
    }

    async fn upsert(&self, user_id: &UserId, fields: ProfileFields) -> Result<Profile, DomainError> {
        let existing = self.storage.get(user_id).await?;
        let previous = existing.as_ref().map(|profile| profile.handle.clone());

        let requested = fields
            .handle
            .clone()
            .filter(|handle| !handle.is_empty() && previous.as_deref() != Some(handle.as_str()));

        let claimed = match requested.as_deref() {
            Some(handle) => self.claim_handle(handle, user_id).await?,
            None => false,
        };

        match self.write(existing, user_id, fields).await {
            Ok(profile) => {
                if requested.is_some() {
                    if let Some(old) = previous.filter(|old| !old.is_empty()) {
                        self.release_handle(&old).await;
                    }
                }
                Ok(profile)
            }
            Err(e) => {
                if let (true, Some(handle)) = (claimed, requested.as_deref()) {
                    self.release_handle(handle).await;
                }
                Err(e)
            }
        }
    }

    async fn append_experience(
        &self,
        user_id: &UserId,
        experience: Experience,
    ) -> Result<Profile, DomainError> {
        self.modify(user_id, |profile| profile.experience.insert(0, experience))
            .await
    }

    async fn append_education(
        &self,
        user_id: &UserId,
        education: Education,
    ) -> Result<Profile, DomainError> {
        self.modify(user_id, |profile| profile.education.insert(0, education))
            .await
    }

    async fn remove_experience(&self, user_id: &UserId, exp_id: &str) -> Result<Profile, DomainError> {
        self.modify(user_id, |profile| profile.experience.retain(|entry| entry.id != exp_id))
            .await
    }

    async fn remove_education(&self, user_id: &UserId, edu_id: &str) -> Result<Profile, DomainError> {
        self.modify(user_id, |profile| profile.education.retain(|entry| entry.id != edu_id))
            .await
    }

    async fn delete_by_user_id(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let Some(profile) = self.storage.get(user_id).await? else {
            return Ok(false);
        };

        let deleted = self.storage.delete(user_id).await?;
        if deleted && !profile.handle.is_empty() {
            self.release_handle(&profile.handle).await;
        }

        Ok(deleted)
    }
}
