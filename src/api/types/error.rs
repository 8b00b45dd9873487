//! API error type: an HTTP status plus a JSON object of field → message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::domain::validation::ValidationErrors;
use crate::domain::DomainError;

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Map<String, Value>,
}

impl ApiError {
    /// Error reported under a single field
    pub fn field(status: StatusCode, key: impl Into<String>, message: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert(key.into(), Value::String(message.into()));
        Self { status, body }
    }

    /// 400 with one entry per failed field
    pub fn validation(errors: &ValidationErrors) -> Self {
        let body = errors
            .iter()
            .map(|(field, message)| (field.to_string(), Value::String(message.to_string())))
            .collect();

        Self {
            status: StatusCode::BAD_REQUEST,
            body,
        }
    }

    pub fn bad_request(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::field(StatusCode::BAD_REQUEST, key, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::field(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn not_found(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::field(StatusCode::NOT_FOUND, key, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::field(StatusCode::INTERNAL_SERVER_ERROR, "error", message)
    }

    pub fn unavailable(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::field(StatusCode::SERVICE_UNAVAILABLE, key, message)
    }

    /// Message stored under `key`, if any
    pub fn message(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Value::Object(self.body))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation(errors) => Self::validation(errors),
            DomainError::NotFound { key, message } => Self::not_found(key, message),
            DomainError::DuplicateIdentity
            | DomainError::DuplicateHandle
            | DomainError::AlreadyLiked
            | DomainError::NotLiked => Self::bad_request(err.key(), err.message()),
            DomainError::CommentNotFound => Self::not_found(err.key(), err.message()),
            DomainError::NotAuthorized => {
                Self::field(StatusCode::UNAUTHORIZED, err.key(), err.message())
            }
            DomainError::Concurrency { message } => {
                tracing::warn!(error = %message, "Concurrent modification rejected");
                Self::field(StatusCode::CONFLICT, err.key(), message)
            }
            DomainError::Provider { provider, message } => {
                tracing::warn!(provider = %provider, error = %message, "Upstream provider failed");
                Self::unavailable(provider, message)
            }
            DomainError::Storage { message } => {
                tracing::error!(error = %message, "Storage failure");
                let mut body = Map::new();
                body.insert("name".to_string(), Value::String("DB error".to_string()));
                body.insert("error".to_string(), Value::String(message.clone()));
                Self {
                    status: StatusCode::BAD_REQUEST,
                    body,
                }
            }
            DomainError::Configuration { message } | DomainError::Internal { message } => {
                tracing::error!(error = %message, "Internal error");
                Self::internal(message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, Value::Object(self.body.clone()))
    }
}

impl std::error::Error for ApiError {}
