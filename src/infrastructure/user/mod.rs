//! User infrastructure - repository and service implementations

mod repository;
mod service;

pub use repository::StorageUserRepository;
pub use service::{LoginRequest, RegisterRequest, UserService};
