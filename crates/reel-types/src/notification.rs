//! Inbox notification types

use crate::validation::{require_text, Validate, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Mention,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Like => write!(f, "like"),
            NotificationKind::Comment => write!(f, "comment"),
            NotificationKind::Follow => write!(f, "follow"),
            NotificationKind::Mention => write!(f, "mention"),
        }
    }
}

/// Inbox entry addressed to `user_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub user_id: String,
    pub from_user_id: String,
    pub from_username: String,
    pub from_avatar: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(id: String, new: NewNotification) -> Self {
        Self {
            id,
            kind: new.kind,
            user_id: new.user_id,
            from_user_id: new.from_user_id,
            from_username: new.from_username,
            from_avatar: new.from_avatar,
            content: new.content,
            video_id: new.video_id,
            is_read: new.is_read,
            created_at: Utc::now(),
        }
    }
}

/// Notification insert payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub user_id: String,
    pub from_user_id: String,
    pub from_username: String,
    pub from_avatar: String,
    pub content: String,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}

impl Validate for NewNotification {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("userId", &self.user_id)?;
        require_text("fromUserId", &self.from_user_id)?;
        require_text("fromUsername", &self.from_username)?;
        Ok(())
    }
}
