//! Profile service: upsert, nested entries and owner population

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::profile::{Education, Experience, Profile, ProfileFields, ProfileRepository, Social};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

use super::repository::no_profile;

/// Profile upsert payload, read after validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub handle: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<ProfileRequest> for ProfileFields {
    /// Keeps only non-empty values; skills are comma separated
    fn from(request: ProfileRequest) -> Self {
        Self {
            handle: present(request.handle),
            company: present(request.company),
            website: present(request.website),
            location: present(request.location),
            status: present(request.status),
            skills: request.skills.map(|skills| {
                skills
                    .split(',')
                    .map(|skill| skill.trim().to_string())
                    .filter(|skill| !skill.is_empty())
                    .collect()
            }),
            bio: present(request.bio),
            githubusername: present(request.githubusername),
            social: Social {
                youtube: present(request.youtube),
                twitter: present(request.twitter),
                facebook: present(request.facebook),
                linkedin: present(request.linkedin),
                instagram: present(request.instagram),
            },
        }
    }
}

/// Experience payload, read after validation
#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceRequest {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ExperienceRequest> for Experience {
    fn from(request: ExperienceRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            company: request.company,
            location: present(request.location),
            from: request.from,
            to: present(request.to),
            current: request.current,
            description: present(request.description),
        }
    }
}

/// Education payload, read after validation
#[derive(Debug, Clone, Deserialize)]
pub struct EducationRequest {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<EducationRequest> for Education {
    fn from(request: EducationRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            school: request.school,
            degree: request.degree,
            fieldofstudy: request.fieldofstudy,
            from: request.from,
            to: present(request.to),
            current: request.current,
            description: present(request.description),
        }
    }
}

/// A profile together with its owner, `None` if the account is gone
pub type PopulatedProfile = (Profile, Option<User>);

/// Profile service
#[derive(Debug)]
pub struct ProfileService<R: ProfileRepository, U: UserRepository> {
    repository: Arc<R>,
    users: Arc<U>,
}

impl<R: ProfileRepository, U: UserRepository> ProfileService<R, U> {
    pub fn new(repository: Arc<R>, users: Arc<U>) -> Self {
        Self { repository, users }
    }

    async fn populate(&self, profile: Profile) -> Result<PopulatedProfile, DomainError> {
        let owner = self.users.find_by_id(&profile.user).await?;
        Ok((profile, owner))
    }

    pub async fn get_by_user(&self, user_id: &UserId) -> Result<PopulatedProfile, DomainError> {
        let profile = self
            .repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(no_profile)?;

        self.populate(profile).await
    }

    pub async fn get_by_handle(&self, handle: &str) -> Result<PopulatedProfile, DomainError> {
        let profile = self
            .repository
            .find_by_handle(handle)
            .await?
            .ok_or_else(no_profile)?;

        self.populate(profile).await
    }

    /// Every profile; an empty collection is reported as not found
    pub async fn list(&self) -> Result<Vec<PopulatedProfile>, DomainError> {
        let profiles = self.repository.find_all().await?;

        if profiles.is_empty() {
            return Err(DomainError::not_found("noprofile", "There are no profiles"));
        }

        let mut populated = Vec::with_capacity(profiles.len());
        for profile in profiles {
            populated.push(self.populate(profile).await?);
        }

        Ok(populated)
    }

    pub async fn upsert(&self, user_id: &UserId, request: ProfileRequest) -> Result<Profile, DomainError> {
        debug!(user_id = %user_id, "Upserting profile");

        let profile = self.repository.upsert(user_id, request.into()).await?;

        info!(user_id = %user_id, handle = %profile.handle, version = profile.version, "Profile saved");
        Ok(profile)
    }

    pub async fn add_experience(
        &self,
        user_id: &UserId,
        request: ExperienceRequest,
    ) -> Result<Profile, DomainError> {
        self.repository.append_experience(user_id, request.into()).await
    }

    pub async fn add_education(
        &self,
        user_id: &UserId,
        request: EducationRequest,
    ) -> Result<Profile, DomainError> {
        self.repository.append_education(user_id, request.into()).await
    }

    pub async fn remove_experience(&self, user_id: &UserId, exp_id: &str) -> Result<Profile, DomainError> {
        self.repository.remove_experience(user_id, exp_id).await
    }

    pub async fn remove_education(&self, user_id: &UserId, edu_id: &str) -> Result<Profile, DomainError> {
        self.repository.remove_education(user_id, edu_id).await
    }

    /// Deletes the profile first, then the account
    pub async fn delete_account(&self, user_id: &UserId) -> Result<(), DomainError> {
        let profile_deleted = self.repository.delete_by_user_id(user_id).await?;
        let user_deleted = self.users.delete_by_id(user_id).await?;

        info!(user_id = %user_id, profile_deleted, user_deleted, "Account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::profile::StorageProfileRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::user::StorageUserRepository;

    type TestService = ProfileService<StorageProfileRepository, StorageUserRepository>;

    async fn setup() -> (TestService, Arc<StorageUserRepository>, User) {
        let users = Arc::new(StorageUserRepository::new(
            Arc::new(InMemoryStorage::new()),
            Arc::new(InMemoryStorage::new()),
        ));
        let profiles = Arc::new(StorageProfileRepository::new(
            Arc::new(InMemoryStorage::new()),
            Arc::new(InMemoryStorage::new()),
        ));
        let user = users
            .create(User::new("Ada", "ada@example.com", "//avatar/ada", "hash"))
            .await
            .unwrap();

        (ProfileService::new(profiles, users.clone()), users, user)
    }

    fn request(handle: &str) -> ProfileRequest {
        ProfileRequest {
            handle: Some(handle.to_string()),
            status: Some("Developer".to_string()),
            skills: Some("rust, sql ,,go".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_conversion_filters_empty_values() {
        let fields: ProfileFields = ProfileRequest {
            company: Some("".to_string()),
            twitter: Some("twitter.com/ada".to_string()),
            ..request("ada")
        }
        .into();

        assert_eq!(fields.company, None);
        assert_eq!(fields.skills, Some(vec!["rust".to_string(), "sql".to_string(), "go".to_string()]));
        assert_eq!(fields.social.twitter.as_deref(), Some("twitter.com/ada"));
        assert_eq!(fields.social.youtube, None);
    }

    #[tokio::test]
    async fn test_upsert_twice_keeps_omitted_website() {
        let (service, _, user) = setup().await;

        service
            .upsert(
                user.id(),
                ProfileRequest {
                    company: Some("Acme".to_string()),
                    website: Some("https://ada.dev".to_string()),
                    ..request("ada")
                },
            )
            .await
            .unwrap();
        let updated = service
            .upsert(
                user.id(),
                ProfileRequest {
                    company: Some("Globex".to_string()),
                    ..request("ada")
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.company.as_deref(), Some("Globex"));
        assert_eq!(updated.website.as_deref(), Some("https://ada.dev"));
    }

    #[tokio::test]
    async fn test_get_by_user_populates_owner() {
        let (service, _, user) = setup().await;
        service.upsert(user.id(), request("ada")).await.unwrap();

        let (profile, owner) = service.get_by_user(user.id()).await.unwrap();
        assert_eq!(profile.handle, "ada");
        assert_eq!(owner.map(|u| u.name().to_string()), Some("Ada".to_string()));
    }

    #[tokio::test]
    async fn test_list_empty_is_not_found() {
        let (service, _, _) = setup().await;

        match service.list().await {
            Err(DomainError::NotFound { key, message }) => {
                assert_eq!(key, "noprofile");
                assert_eq!(message, "There are no profiles");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_and_remove_education() {
        let (service, _, user) = setup().await;
        service.upsert(user.id(), request("ada")).await.unwrap();

        let profile = service
            .add_education(
                user.id(),
                EducationRequest {
                    school: "Cambridge".to_string(),
                    degree: "BSc".to_string(),
                    fieldofstudy: "Mathematics".to_string(),
                    from: "1830-01-01".to_string(),
                    to: Some("".to_string()),
                    current: false,
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].to, None);

        let edu_id = profile.education[0].id.clone();
        let profile = service.remove_education(user.id(), &edu_id).await.unwrap();
        assert!(profile.education.is_empty());
    }

    #[tokio::test]
    async fn test_delete_account_removes_profile_and_user() {
        let (service, users, user) = setup().await;
        service.upsert(user.id(), request("ada")).await.unwrap();

        service.delete_account(user.id()).await.unwrap();

        assert!(service.get_by_user(user.id()).await.is_err());
        assert!(users.find_by_id(user.id()).await.unwrap().is_none());
    }
}
