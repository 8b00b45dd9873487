//! Storage-backed user repository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::storage::{ClaimValue, Storage, UniqueClaim};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of UserRepository
///
/// Emails are reserved in a separate claim collection keyed by the trimmed
/// address, so two registrations racing on one email cannot both insert.
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
    emails: Arc<dyn Storage<UniqueClaim>>,
}

impl StorageUserRepository {
    pub fn new(storage: Arc<dyn Storage<User>>, emails: Arc<dyn Storage<UniqueClaim>>) -> Self {
        Self { storage, emails }
    }

    async fn release_email(&self, email: &str) {
        if let Err(e) = self.emails.delete(&ClaimValue::new(email)).await {
            warn!(email = %email, error = %e, "Failed to release email claim");
        }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let Some(claim) = self.emails.get(&ClaimValue::new(email.trim())).await? else {
            return Ok(None);
        };

        self.storage.get(&UserId::new(claim.owner())).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let email = user.email().trim().to_string();

        match self
            .emails
            .create(UniqueClaim::new(email.as_str(), user.id().as_str()))
            .await
        {
            Ok(_) => {}
            Err(DomainError::Concurrency { .. }) => return Err(DomainError::DuplicateIdentity),
            Err(e) => return Err(e),
        }

        match self.storage.create(user).await {
            Ok(user) => Ok(user),
            Err(e) => {
                self.release_email(&email).await;
                Err(e)
            }
        }
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<bool, DomainError> {
        let Some(user) = self.storage.get(id).await? else {
            return Ok(false);
        };

        let deleted = self.storage.delete(id).await?;
        if deleted {
            self.release_email(user.email().trim()).await;
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStorage;
    use crate::infrastructure::storage::InMemoryStorage;

    fn repository() -> StorageUserRepository {
        StorageUserRepository::new(
            Arc::new(InMemoryStorage::new()),
            Arc::new(InMemoryStorage::new()),
        )
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = repository();
        let user = repo
            .create(User::new("Ada", "ada@example.com", "//a", "hash"))
            .await
            .unwrap();

        let found = repo.find_by_email(" ada@example.com ").await.unwrap();
        assert_eq!(found.map(|u| u.id().clone()), Some(user.id().clone()));
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_claimed_email() {
        let repo = repository();
        repo.create(User::new("Ada", "ada@example.com", "//a", "hash"))
            .await
            .unwrap();

        let result = repo
            .create(User::new("Other", "ada@example.com", "//a", "hash"))
            .await;

        assert!(matches!(result, Err(DomainError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_failed_insert_releases_email() {
        let emails: Arc<InMemoryStorage<UniqueClaim>> = Arc::new(InMemoryStorage::new());
        let failing = StorageUserRepository::new(
            Arc::new(MockStorage::<User>::new().with_error("disk full")),
            emails.clone(),
        );

        let result = failing
            .create(User::new("Ada", "ada@example.com", "//a", "hash"))
            .await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
        assert!(emails.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = repository();
        let user = repo
            .create(User::new("Ada", "ada@example.com", "//a", "hash"))
            .await
            .unwrap();

        assert!(repo.delete_by_id(user.id()).await.unwrap());
        assert!(repo.find_by_id(user.id()).await.unwrap().is_none());
        assert!(!repo.delete_by_id(user.id()).await.unwrap());

        // the address can be registered again once the account is gone
        repo.create(User::new("Ada", "ada@example.com", "//a", "hash"))
            .await
            .unwrap();
    }
}
