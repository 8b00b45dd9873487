//! Credential infrastructure
//!
//! Password hashing, avatar derivation and access token handling.

mod avatar;
mod jwt;
mod password;

pub use avatar::gravatar_url;
pub use jwt::{
    JwtConfig, JwtService, TokenClaims, TokenError, TokenService, DEFAULT_TOKEN_TTL_SECS,
};
pub use password::{Argon2Hasher, PasswordHasher};
