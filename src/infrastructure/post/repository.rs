//! Storage-backed post repository

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::post::{post_not_found, Comment, Like, Post, PostId, PostRepository};
use crate::domain::storage::Storage;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Storage-backed implementation of PostRepository
#[derive(Debug)]
pub struct StoragePostRepository {
    storage: Arc<dyn Storage<Post>>,
}

impl StoragePostRepository {
    pub fn new(storage: Arc<dyn Storage<Post>>) -> Self {
        Self { storage }
    }

    async fn load(&self, id: &PostId) -> Result<Post, DomainError> {
        self.storage
            .get(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    /// Read-modify-write guarded by the post version
    async fn modify<F>(&self, id: &PostId, change: F) -> Result<Post, DomainError>
    where
        F: FnOnce(&mut Post) -> Result<(), DomainError> + Send,
    {
        let mut post = self.load(id).await?;
        let expected_version = post.version;

        change(&mut post)?;
        post.version = expected_version + 1;

        self.storage.update_versioned(post, expected_version).await
    }
}

#[async_trait]
impl PostRepository for StoragePostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.storage.list().await?;
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        self.storage.create(post).await
    }

    async fn delete_by_id(&self, id: &PostId, owner_id: &UserId) -> Result<(), DomainError> {
        let post = self.load(id).await?;

        if !post.is_owned_by(owner_id) {
            return Err(DomainError::NotAuthorized);
        }

        if !self.storage.delete(id).await? {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    async fn add_like(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError> {
        self.modify(id, |post| {
            if post.is_liked_by(user_id) {
                return Err(DomainError::AlreadyLiked);
            }
            post.likes.push(Like {
                user: user_id.clone(),
            });
            Ok(())
        })
        .await
    }

    async fn remove_like(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError> {
        self.modify(id, |post| {
            if !post.is_liked_by(user_id) {
                return Err(DomainError::NotLiked);
            }
            post.likes.retain(|like| like.user != *user_id);
            Ok(())
        })
        .await
    }

    async fn add_comment(&self, id: &PostId, comment: Comment) -> Result<Post, DomainError> {
        self.modify(id, |post| {
            post.comments.insert(0, comment);
            Ok(())
        })
        .await
    }

    async fn remove_comment(
        &self,
        id: &PostId,
        comment_id: &str,
        author_id: &UserId,
    ) -> Result<Post, DomainError> {
        self.modify(id, |post| {
            let position = post
                .comments
                .iter()
                .position(|comment| comment.id == comment_id)
                .ok_or(DomainError::CommentNotFound)?;

            if post.comments[position].user.as_str() != author_id.as_str() {
                return Err(DomainError::NotAuthorized);
            }

            post.comments.remove(position);
            Ok(())
        })
        .await
    }
}
