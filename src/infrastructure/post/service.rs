//! Post service

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::post::{post_not_found, Comment, Post, PostId, PostRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Post or comment payload, read after validation
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    pub text: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Post service
#[derive(Debug)]
pub struct PostService<R: PostRepository> {
    repository: Arc<R>,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        self.repository.find_all().await
    }

    pub async fn get(&self, id: &PostId) -> Result<Post, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    pub async fn create(&self, author: &UserId, request: PostRequest) -> Result<Post, DomainError> {
        let post = Post::new(author.clone(), request.text, request.name, request.avatar);
        let post = self.repository.create(post).await?;

        info!(post_id = %post.id, user_id = %author, "Post created");
        Ok(post)
    }

    pub async fn delete(&self, id: &PostId, requester: &UserId) -> Result<(), DomainError> {
        self.repository.delete_by_id(id, requester).await?;

        info!(post_id = %id, user_id = %requester, "Post deleted");
        Ok(())
    }

    pub async fn like(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError> {
        debug!(post_id = %id, user_id = %user_id, "Liking post");
        self.repository.add_like(id, user_id).await
    }

    pub async fn unlike(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError> {
        debug!(post_id = %id, user_id = %user_id, "Unliking post");
        self.repository.remove_like(id, user_id).await
    }

    pub async fn comment(
        &self,
        id: &PostId,
        author: &UserId,
        request: PostRequest,
    ) -> Result<Post, DomainError> {
        let comment = Comment::new(author.clone(), request.text, request.name, request.avatar);
        self.repository.add_comment(id, comment).await
    }

    pub async fn delete_comment(
        &self,
        id: &PostId,
        comment_id: &str,
        requester: &UserId,
    ) -> Result<Post, DomainError> {
        self.repository.remove_comment(id, comment_id, requester).await
    }
}
