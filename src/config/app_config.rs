use serde::Deserialize;

use crate::infrastructure::auth::DEFAULT_TOKEN_TTL_SECS;
use crate::infrastructure::github::GitHubConfig;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub auth: AuthConfig,
    pub github: GitHubSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Document storage backend
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    /// Falls back to the `DATABASE_URL` environment variable
    pub database_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Falls back to the `JWT_SECRET` environment variable
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: u64,
}

/// OAuth app credentials raise the GitHub rate limit; both are optional
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub api_base_url: String,
    pub repo_count: u32,
    pub repo_sort: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        let defaults = GitHubConfig::default();

        Self {
            client_id: None,
            client_secret: None,
            api_base_url: defaults.api_base_url,
            repo_count: defaults.repo_count,
            repo_sort: defaults.repo_sort,
            timeout_secs: defaults.timeout_secs,
        }
    }
}

impl StorageSettings {
    /// Resolves the backend, reading `DATABASE_URL` when no URL is configured
    pub fn to_storage_config(&self) -> anyhow::Result<StorageConfig> {
        let backend = StorageType::from_str(&self.backend)
            .ok_or_else(|| anyhow::anyhow!("Unknown storage backend '{}'", self.backend))?;

        match backend {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = self
                    .database_url
                    .clone()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .ok_or_else(|| {
                        anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
                    })?;

                Ok(StorageConfig::Postgres(
                    PostgresConfig::new(url).with_max_connections(self.max_connections),
                ))
            }
        }
    }
}

impl From<&GitHubSettings> for GitHubConfig {
    fn from(settings: &GitHubSettings) -> Self {
        Self {
            api_base_url: settings.api_base_url.clone(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            repo_count: settings.repo_count,
            repo_sort: settings.repo_sort.clone(),
            timeout_secs: settings.timeout_secs,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
