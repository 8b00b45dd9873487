//! Bearer token authentication for protected routes

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use thiserror::Error;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;
use crate::infrastructure::auth::TokenError;

/// Why a request could not be authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("No authorization token provided")]
    MissingHeader,
    #[error("Authorization header must be 'Bearer <token>'")]
    MalformedHeader,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
    #[error("User no longer exists")]
    UnknownUser,
}

impl From<TokenError> for AuthFailure {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self::InvalidToken,
            TokenError::Expired => Self::ExpiredToken,
        }
    }
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        ApiError::unauthorized(failure.to_string())
    }
}

/// Extractor that resolves the authenticated user
///
/// Header, then token, then account lookup; the first failing step answers
/// 401 and the handler never runs.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let claims = state.user_service.verify_token(token).map_err(|e| {
            debug!(reason = %e, "Token rejected");
            AuthFailure::from(e)
        })?;

        let user = state
            .user_service
            .get(&claims.user_id())
            .await?
            .ok_or(AuthFailure::UnknownUser)?;

        Ok(RequireUser(user))
    }
}

/// Reads the token out of `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthFailure> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthFailure::MissingHeader)?;

    let value = value.to_str().map_err(|_| AuthFailure::MalformedHeader)?;

    match value.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthFailure::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn headers(value: HeaderValue) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value);
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = headers(HeaderValue::from_static("Bearer eyJhbGciOiJIUzI1NiJ9.test"));
        assert_eq!(extract_bearer_token(&headers), Ok("eyJhbGciOiJIUzI1NiJ9.test"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            extract_bearer_token(&HeaderMap::new()),
            Err(AuthFailure::MissingHeader)
        );
    }

    #[test]
    fn test_malformed_headers() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer    ", "bearer abc", "abc"] {
            let headers = headers(HeaderValue::from_static(value));
            assert_eq!(
                extract_bearer_token(&headers),
                Err(AuthFailure::MalformedHeader),
                "{}",
                value
            );
        }
    }

    #[test]
    fn test_non_ascii_header() {
        let headers = headers(HeaderValue::from_bytes(b"Bearer \xe2\x9c\x93").unwrap());
        assert_eq!(extract_bearer_token(&headers), Err(AuthFailure::MalformedHeader));
    }

    #[test]
    fn test_failures_map_to_unauthorized() {
        let err = ApiError::from(AuthFailure::from(TokenError::Expired));

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message("unauthorized"), Some("Token has expired"));
    }
}
