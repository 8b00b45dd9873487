//! User domain
//!
//! Account entity and the repository trait used by registration, login and
//! token resolution.

mod entity;
mod repository;

pub use entity::{User, UserId};
pub use repository::UserRepository;
