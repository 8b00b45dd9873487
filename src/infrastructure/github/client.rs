//! GitHub REST client for a profile's latest repositories

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

use crate::domain::DomainError;

/// Settings for the GitHub API
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub repo_count: u32,
    pub repo_sort: String,
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            client_id: None,
            client_secret: None,
            repo_count: 5,
            repo_sort: "created: asc".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Subset of the GitHub repository object shown on profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
}

/// Source of repositories for a GitHub user
#[async_trait]
pub trait GitHubClientTrait: Send + Sync + Debug {
    async fn latest_repos(&self, username: &str) -> Result<Vec<GitHubRepo>, DomainError>;
}

/// reqwest-backed client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("per_page", self.config.repo_count.to_string()),
            ("sort", self.config.repo_sort.clone()),
        ];

        if let Some(client_id) = &self.config.client_id {
            query.push(("client_id", client_id.clone()));
        }
        if let Some(client_secret) = &self.config.client_secret {
            query.push(("client_secret", client_secret.clone()));
        }

        query
    }

    /// `{base}/users/{username}/repos` with the username kept as one
    /// percent-encoded path segment
    fn repos_url(&self, username: &str) -> Result<Url, DomainError> {
        if username.is_empty() || username == "." || username == ".." {
            return Err(unknown_user(username));
        }

        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            DomainError::configuration(format!("Invalid GitHub API base URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| DomainError::configuration("GitHub API base URL cannot take a path"))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);

        Ok(url)
    }
}

fn unknown_user(username: &str) -> DomainError {
    DomainError::not_found("githubusername", format!("No GitHub user found: {}", username))
}

#[async_trait]
impl GitHubClientTrait for GitHubClient {
    async fn latest_repos(&self, username: &str) -> Result<Vec<GitHubRepo>, DomainError> {
        let url = self.repos_url(username)?;
        debug!(url = %url, "Fetching GitHub repositories");

        let response = self
            .client
            .get(url)
            .query(&self.query())
            .send()
            .await
            .map_err(|e| DomainError::provider("github", format!("Request failed: {}", e)))?;

        match response.status() {
            status if status.is_success() => response.json().await.map_err(|e| {
                DomainError::provider("github", format!("Failed to parse response: {}", e))
            }),
            StatusCode::NOT_FOUND => Err(unknown_user(username)),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DomainError::provider(
                    "github",
                    format!("HTTP {}: {}", status, body),
                ))
            }
        }
    }
}
