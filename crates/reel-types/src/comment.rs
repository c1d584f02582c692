//! Comment types

use crate::validation::{limit_text, require_text, Validate, ValidationError, MAX_COMMENT_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub video_id: String,
    pub user_id: String,
    pub username: String,
    pub avatar: String,
    pub content: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: String, new: NewComment) -> Self {
        Self {
            id,
            video_id: new.video_id,
            user_id: new.body.user_id,
            username: new.body.username,
            avatar: new.body.avatar,
            content: new.body.content,
            likes: 0,
            is_liked: new.body.is_liked,
            created_at: Utc::now(),
        }
    }
}

/// Comment fields as posted by the client; the video comes from the URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub user_id: String,
    pub username: String,
    pub avatar: String,
    pub content: String,
    #[serde(default)]
    pub is_liked: bool,
}

impl CommentBody {
    /// Attach the body to the video it was posted under
    pub fn for_video(self, video_id: impl Into<String>) -> NewComment {
        NewComment {
            video_id: video_id.into(),
            body: self,
        }
    }
}

impl Validate for CommentBody {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("userId", &self.user_id)?;
        require_text("username", &self.username)?;
        require_text("content", &self.content)?;
        limit_text("content", &self.content, MAX_COMMENT_LEN)?;
        Ok(())
    }
}

/// Comment insert payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub video_id: String,
    #[serde(flatten)]
    pub body: CommentBody,
}

impl Validate for NewComment {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("videoId", &self.video_id)?;
        self.body.validate()
    }
}
