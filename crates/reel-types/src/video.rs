//! Video types

use crate::validation::{limit_text, require_text, Validate, ValidationError, MAX_CAPTION_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short video in the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub username: String,
    pub caption: String,
    pub music: String,
    pub thumbnail: String,
    pub video_url: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub views: u64,
    /// Whether the current user liked this video
    #[serde(default)]
    pub is_liked: bool,
    /// Whether the current user follows the author
    #[serde(default)]
    pub is_following: bool,
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Build a fresh record with zeroed counters
    pub fn new(id: String, new: NewVideo) -> Self {
        Self {
            id,
            username: new.username,
            caption: new.caption,
            music: new.music,
            thumbnail: new.thumbnail,
            video_url: new.video_url,
            likes: 0,
            comments: 0,
            shares: 0,
            views: 0,
            is_liked: new.is_liked,
            is_following: new.is_following,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: VideoPatch) {
        if let Some(caption) = patch.caption {
            self.caption = caption;
        }
        if let Some(music) = patch.music {
            self.music = music;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = thumbnail;
        }
        if let Some(video_url) = patch.video_url {
            self.video_url = video_url;
        }
        if let Some(shares) = patch.shares {
            self.shares = shares;
        }
    }
}

/// Video upload payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub username: String,
    pub caption: String,
    pub music: String,
    pub thumbnail: String,
    pub video_url: String,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub is_following: bool,
}

impl Validate for NewVideo {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("username", &self.username)?;
        require_text("caption", &self.caption)?;
        limit_text("caption", &self.caption, MAX_CAPTION_LEN)?;
        require_text("videoUrl", &self.video_url)?;
        Ok(())
    }
}

/// Editable video fields. Counters driven by likes, comments and views are
/// not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPatch {
    pub caption: Option<String>,
    pub music: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub shares: Option<u64>,
}

impl Validate for VideoPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(caption) = &self.caption {
            require_text("caption", caption)?;
            limit_text("caption", caption, MAX_CAPTION_LEN)?;
        }
        if let Some(video_url) = &self.video_url {
            require_text("videoUrl", video_url)?;
        }
        Ok(())
    }
}
