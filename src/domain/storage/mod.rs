//! Storage domain - document storage abstraction shared by users, profiles and posts

mod claim;
mod entity;
mod repository;

pub use claim::{ClaimValue, UniqueClaim};
pub use entity::{StorageEntity, StorageKey};
pub use repository::Storage;

#[cfg(test)]
pub use repository::mock;
