//! Post repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Comment, Post, PostId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for post storage
///
/// Every mutation of a missing post fails with `NotFound` under the
/// `nopostfound` key.
#[async_trait]
pub trait PostRepository: Send + Sync + Debug {
    /// All posts, newest first
    async fn find_all(&self) -> Result<Vec<Post>, DomainError>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    async fn create(&self, post: Post) -> Result<Post, DomainError>;

    /// Deletes a post on behalf of `owner_id`; anyone else gets `NotAuthorized`
    async fn delete_by_id(&self, id: &PostId, owner_id: &UserId) -> Result<(), DomainError>;

    /// Fails with `AlreadyLiked` if the user already likes the post
    async fn add_like(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError>;

    /// Fails with `NotLiked` if the user never liked the post
    async fn remove_like(&self, id: &PostId, user_id: &UserId) -> Result<Post, DomainError>;

    /// Prepends a comment
    async fn add_comment(&self, id: &PostId, comment: Comment) -> Result<Post, DomainError>;

    /// Removes a comment written by `author_id`.
    ///
    /// Fails with `CommentNotFound` for an unknown comment and `NotAuthorized`
    /// when somebody else wrote it.
    async fn remove_comment(
        &self,
        id: &PostId,
        comment_id: &str,
        author_id: &UserId,
    ) -> Result<Post, DomainError>;
}
