//! Domain layer - Core business logic and entities

pub mod error;
pub mod post;
pub mod profile;
pub mod storage;
pub mod user;
pub mod validation;

pub use error::DomainError;
pub use post::{Comment, Like, Post, PostId, PostRepository};
pub use profile::{Education, Experience, Profile, ProfileFields, ProfileRepository, Social};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use user::{User, UserId, UserRepository};
pub use validation::{ValidationErrors, ValidationResult};
