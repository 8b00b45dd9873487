//! Unique value claims
//!
//! A claim document is keyed by the value it reserves, so `Storage::create`
//! on a claim collection doubles as an atomic uniqueness check.

use serde::{Deserialize, Serialize};

use super::entity::{StorageEntity, StorageKey};

/// The reserved value, used as the document key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimValue(String);

impl ClaimValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl StorageKey for ClaimValue {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reservation of a unique value by an owner id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniqueClaim {
    value: ClaimValue,
    owner: String,
}

impl UniqueClaim {
    pub fn new(value: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            value: ClaimValue::new(value),
            owner: owner.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl StorageEntity for UniqueClaim {
    type Key = ClaimValue;

    fn key(&self) -> &Self::Key {
        &self.value
    }
}
