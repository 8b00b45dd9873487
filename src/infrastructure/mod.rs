//! Infrastructure layer - storage, credentials, services and external clients

pub mod auth;
pub mod github;
pub mod logging;
pub mod post;
pub mod profile;
pub mod storage;
pub mod user;
