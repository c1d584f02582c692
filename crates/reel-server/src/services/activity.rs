//! Relationship actions that fan out inbox notifications

use crate::storage::Storage;
use reel_types::{
    Comment, CommentBody, NewNotification, Notification, NotificationKind, User, Video,
};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ActivityService {
    storage: Arc<dyn Storage>,
}

impl ActivityService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Like a video, notifying its author the first time `user_id` likes it
    pub async fn like_video(&self, video_id: &str, user_id: &str) -> Option<Video> {
        let (video, added) = self.storage.like_video(video_id, user_id).await?;

        if added {
            if let Some(actor) = self.storage.get_user(user_id).await {
                self.notify_author(
                    &video,
                    NotificationKind::Like,
                    &actor.id,
                    &actor.username,
                    &actor.avatar,
                    "liked your video".to_string(),
                )
                .await;
            }
        }

        Some(video)
    }

    /// Post a comment under a video. `None` when the video does not exist.
    pub async fn comment(&self, video_id: &str, body: CommentBody) -> Option<Comment> {
        let comment = self
            .storage
            .create_comment(body.for_video(video_id))
            .await?;
        info!("Comment {} posted on video {}", comment.id, video_id);

        // the video may be gone again by now; the comment went with it
        if let Some(video) = self.storage.get_video(video_id).await {
            self.notify_author(
                &video,
                NotificationKind::Comment,
                &comment.user_id,
                &comment.username,
                &comment.avatar,
                comment.content.clone(),
            )
            .await;
        }

        Some(comment)
    }

    /// Follow a user; the followee is notified when the edge is new
    pub async fn follow(&self, follower_id: &str, followee_id: &str) -> bool {
        if !self.storage.follow_user(follower_id, followee_id).await {
            return false;
        }

        let Some(followee) = self.storage.get_user(followee_id).await else {
            debug!("No user record for {}, skipping follow notification", followee_id);
            return true;
        };
        if let Some(follower) = self.storage.get_user(follower_id).await {
            self.notify(NewNotification {
                kind: NotificationKind::Follow,
                user_id: followee.id,
                from_user_id: follower.id,
                from_username: follower.username,
                from_avatar: follower.avatar,
                content: "started following you".to_string(),
                video_id: None,
                is_read: false,
            })
            .await;
        }

        true
    }

    async fn notify_author(
        &self,
        video: &Video,
        kind: NotificationKind,
        actor_id: &str,
        actor_username: &str,
        actor_avatar: &str,
        content: String,
    ) {
        let Some(author) = self.author_of(video).await else {
            debug!("No author record for {}, skipping {} notification", video.username, kind);
            return;
        };

        self.notify(NewNotification {
            kind,
            user_id: author.id,
            from_user_id: actor_id.to_string(),
            from_username: actor_username.to_string(),
            from_avatar: actor_avatar.to_string(),
            content,
            video_id: Some(video.id.clone()),
            is_read: false,
        })
        .await;
    }

    async fn author_of(&self, video: &Video) -> Option<User> {
        self.storage.get_user_by_username(&video.username).await
    }

    async fn notify(&self, notification: NewNotification) -> Option<Notification> {
        if notification.user_id == notification.from_user_id {
            return None;
        }
        Some(self.storage.create_notification(notification).await)
    }
}
