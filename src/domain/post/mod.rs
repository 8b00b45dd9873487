//! Post domain

mod entity;
mod repository;

pub use entity::{Comment, Like, Post, PostId};
pub use repository::PostRepository;

use crate::domain::DomainError;

/// Error returned for any lookup or mutation of an unknown post
pub fn post_not_found(id: &PostId) -> DomainError {
    DomainError::not_found("nopostfound", format!("No post found with the ID: {}", id))
}
