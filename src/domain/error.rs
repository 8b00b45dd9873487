use thiserror::Error;

use super::validation::ValidationErrors;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Not found: {message}")]
    NotFound { key: String, message: String },

    #[error("Email already exists")]
    DuplicateIdentity,

    #[error("That handle already exists")]
    DuplicateHandle,

    #[error("User already liked this post")]
    AlreadyLiked,

    #[error("User has not liked this post yet")]
    NotLiked,

    #[error("Comment does not exist")]
    CommentNotFound,

    #[error("User not authorized")]
    NotAuthorized,

    #[error("Concurrent modification: {message}")]
    Concurrency { message: String },

    #[error("Provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Validation failure for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(field, message))
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }

    pub fn not_found(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn concurrency(message: impl Into<String>) -> Self {
        Self::Concurrency {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Response field the error is reported under
    pub fn key(&self) -> &str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound { key, .. } => key,
            Self::DuplicateIdentity => "email",
            Self::DuplicateHandle => "handle",
            Self::AlreadyLiked => "alreadyliked",
            Self::NotLiked => "notliked",
            Self::CommentNotFound => "comment",
            Self::NotAuthorized => "notauthorized",
            Self::Concurrency { .. } => "conflict",
            Self::Provider { provider, .. } => provider,
            Self::Configuration { .. } | Self::Internal { .. } => "error",
            Self::Storage { .. } => "error",
        }
    }

    /// Human readable message without the variant prefix
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { message, .. }
            | Self::Concurrency { message }
            | Self::Provider { message, .. }
            | Self::Configuration { message }
            | Self::Storage { message }
            | Self::Internal { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
