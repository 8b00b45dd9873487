//! Profile entity and nested entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::StorageEntity;
use crate::domain::user::UserId;

/// Links to the supported social networks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// A job entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A school entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields supplied to a profile upsert; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub handle: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub skills: Option<Vec<String>>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: Social,
}

/// Developer profile, one per user and stored under the owner's id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub user: UserId,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl Profile {
    /// Builds a new profile from upsert fields
    pub fn create(user: UserId, fields: ProfileFields) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user,
            handle: fields.handle.unwrap_or_default(),
            company: fields.company,
            website: fields.website,
            location: fields.location,
            status: fields.status.unwrap_or_default(),
            skills: fields.skills.unwrap_or_default(),
            bio: fields.bio,
            githubusername: fields.githubusername,
            social: fields.social,
            experience: Vec::new(),
            education: Vec::new(),
            date: Utc::now(),
            version: 0,
        }
    }

    /// Overwrites only the supplied fields. The social block is replaced as a whole.
    pub fn merge(&mut self, fields: ProfileFields) {
        if let Some(handle) = fields.handle {
            self.handle = handle;
        }
        if let Some(status) = fields.status {
            self.status = status;
        }
        if let Some(skills) = fields.skills {
            self.skills = skills;
        }
        if fields.company.is_some() {
            self.company = fields.company;
        }
        if fields.website.is_some() {
            self.website = fields.website;
        }
        if fields.location.is_some() {
            self.location = fields.location;
        }
        if fields.bio.is_some() {
            self.bio = fields.bio;
        }
        if fields.githubusername.is_some() {
            self.githubusername = fields.githubusername;
        }
        self.social = fields.social;
    }
}

impl StorageEntity for Profile {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.user
    }

    fn version(&self) -> Option<u64> {
        Some(self.version)
    }
}
