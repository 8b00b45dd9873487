//! Post infrastructure - repository and service implementations

mod repository;
mod service;

pub use repository::StoragePostRepository;
pub use service::{PostRequest, PostService};
