//! User types

use crate::validation::{require_text, Validate, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creator profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub avatar: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh profile with zeroed counters
    pub fn new(id: String, new: NewUser) -> Self {
        Self {
            id,
            username: new.username,
            display_name: new.display_name,
            bio: new.bio,
            avatar: new.avatar,
            followers: 0,
            following: 0,
            total_likes: 0,
            verified: new.verified,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(display_name) = patch.display_name {
            self.display_name = display_name;
        }
        if let Some(bio) = patch.bio {
            self.bio = Some(bio);
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(verified) = patch.verified {
            self.verified = verified;
        }
    }
}

/// Sign-up payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub avatar: String,
    #[serde(default)]
    pub verified: bool,
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("username", &self.username)?;
        require_text("displayName", &self.display_name)?;
        if self.username.chars().any(char::is_whitespace) {
            return Err(ValidationError::Invalid(
                "username must not contain whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

/// Editable profile fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub verified: Option<bool>,
}

impl Validate for UserPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(display_name) = &self.display_name {
            require_text("displayName", display_name)?;
        }
        Ok(())
    }
}
