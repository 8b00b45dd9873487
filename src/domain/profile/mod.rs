//! Profile domain

mod entity;
mod repository;

pub use entity::{Education, Experience, Profile, ProfileFields, Social};
pub use repository::ProfileRepository;
