//! HTTP middleware and extractors

pub mod logging;
pub mod security;
pub mod user_auth;

pub use logging::logging_middleware;
pub use security::{security_headers_middleware, MAX_BODY_SIZE};
pub use user_auth::{extract_bearer_token, AuthFailure, RequireUser};
