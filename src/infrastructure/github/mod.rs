//! GitHub integration

mod client;

pub use client::{GitHubClient, GitHubClientTrait, GitHubConfig, GitHubRepo};
