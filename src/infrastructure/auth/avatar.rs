//! Gravatar URL derivation

use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "//www.gravatar.com/avatar";

/// Size 200, PG rating, "mystery person" fallback
const GRAVATAR_OPTIONS: &str = "s=200&r=pg&d=mm";

/// Builds the avatar URL for an email address.
///
/// The address is trimmed and lower-cased before hashing, so the same mailbox
/// always maps to the same picture.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());

    format!("{}/{}?{}", GRAVATAR_BASE, hex::encode(digest), GRAVATAR_OPTIONS)
}
