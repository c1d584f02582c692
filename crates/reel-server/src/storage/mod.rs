//! Storage layer
//!
//! Entity collections and the relationship indexes (who liked what, who
//! follows whom) live behind the [`Storage`] trait. The only backend is the
//! in-memory [`MemoryStorage`]; state resets when the process exits.

pub mod memory;

pub use memory::MemoryStorage;

use async_trait::async_trait;
use reel_types::{
    Comment, NewComment, NewNotification, NewUser, NewVideo, Notification, User, UserPatch,
    Video, VideoPatch,
};

/// Entity store
///
/// Lookups and toggles report a missing record as `None`/`false`. Relationship
/// toggles are idempotent per actor: repeating a like or follow leaves the
/// counters untouched.
#[async_trait]
pub trait Storage: Send + Sync {
    // Videos
    async fn list_videos(&self) -> Vec<Video>;
    async fn get_video(&self, id: &str) -> Option<Video>;
    async fn create_video(&self, video: NewVideo) -> Video;
    async fn update_video(&self, id: &str, patch: VideoPatch) -> Option<Video>;
    async fn delete_video(&self, id: &str) -> bool;
    /// The flag is true when this call added the like
    async fn like_video(&self, video_id: &str, user_id: &str) -> Option<(Video, bool)>;
    async fn unlike_video(&self, video_id: &str, user_id: &str) -> Option<Video>;
    async fn video_liked_by(&self, video_id: &str, user_id: &str) -> bool;
    async fn increment_views(&self, video_id: &str) -> Option<Video>;

    // Users
    async fn list_users(&self) -> Vec<User>;
    async fn get_user(&self, id: &str) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn create_user(&self, user: NewUser) -> User;
    async fn update_user(&self, id: &str, patch: UserPatch) -> Option<User>;
    async fn follow_user(&self, follower_id: &str, followee_id: &str) -> bool;
    async fn unfollow_user(&self, follower_id: &str, followee_id: &str) -> bool;
    async fn is_following(&self, follower_id: &str, followee_id: &str) -> bool;

    // Comments
    async fn list_comments(&self, video_id: &str) -> Vec<Comment>;
    async fn get_comment(&self, id: &str) -> Option<Comment>;
    /// `None` when the video does not exist; nothing is stored then
    async fn create_comment(&self, comment: NewComment) -> Option<Comment>;
    async fn like_comment(&self, comment_id: &str, user_id: &str) -> Option<Comment>;
    async fn unlike_comment(&self, comment_id: &str, user_id: &str) -> Option<Comment>;
    async fn delete_comment(&self, id: &str) -> bool;

    // Notifications
    async fn list_notifications(&self, user_id: &str) -> Vec<Notification>;
    async fn create_notification(&self, notification: NewNotification) -> Notification;
    async fn mark_notification_read(&self, id: &str) -> bool;
    async fn mark_all_notifications_read(&self, user_id: &str) -> usize;
}
