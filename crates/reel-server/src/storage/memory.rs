//! In-memory storage using DashMap

use super::Storage;
use crate::seed;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use reel_types::{
    new_id, Comment, NewComment, NewNotification, NewUser, NewVideo, Notification, User,
    UserPatch, Video, VideoPatch,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// A stored record and its insertion sequence number.
///
/// The sequence breaks ties between records created within the same clock
/// tick, so "newest first" is a total order.
struct Slot<T> {
    seq: u64,
    record: T,
}

trait Created {
    fn created_at(&self) -> DateTime<Utc>;
}

impl Created for Video {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Created for Comment {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Created for Notification {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Process-local store for every entity and relationship index.
///
/// Lock order: an entity map entry may be held while touching an index map,
/// never the reverse, and never two entries of the same map at once. A video
/// entry may additionally be held while a comment is inserted.
pub struct MemoryStorage {
    /// User that `is_liked`/`is_following` flags are computed for
    viewer_id: String,
    seq: AtomicU64,
    videos: DashMap<String, Slot<Video>>,
    users: DashMap<String, Slot<User>>,
    comments: DashMap<String, Slot<Comment>>,
    notifications: DashMap<String, Slot<Notification>>,
    /// video id -> users who liked it
    video_likes: DashMap<String, HashSet<String>>,
    /// comment id -> users who liked it
    comment_likes: DashMap<String, HashSet<String>>,
    /// followee id -> follower ids
    followers: DashMap<String, HashSet<String>>,
}

impl MemoryStorage {
    /// Empty store
    pub fn new(viewer_id: impl Into<String>) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            seq: AtomicU64::new(0),
            videos: DashMap::new(),
            users: DashMap::new(),
            comments: DashMap::new(),
            notifications: DashMap::new(),
            video_likes: DashMap::new(),
            comment_likes: DashMap::new(),
            followers: DashMap::new(),
        }
    }

    /// Store preloaded with the demo users and videos
    pub fn seeded(viewer_id: impl Into<String>) -> Self {
        let storage = Self::new(viewer_id);
        for user in seed::demo_users() {
            storage.insert_user(user);
        }
        for video in seed::demo_videos() {
            storage.insert_video(video);
        }
        if storage.is_viewer(seed::DEMO_VIEWER_ID) {
            storage.mirror_viewer_flags();
        } else {
            storage.clear_viewer_flags();
        }
        storage
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    /// Insert a complete user record as-is, counters included
    pub fn insert_user(&self, user: User) {
        let seq = self.next_seq();
        self.users.insert(user.id.clone(), Slot { seq, record: user });
    }

    /// Insert a complete video record as-is, counters included
    pub fn insert_video(&self, video: Video) {
        let seq = self.next_seq();
        self.videos
            .insert(video.id.clone(), Slot { seq, record: video });
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    fn is_viewer(&self, user_id: &str) -> bool {
        self.viewer_id == user_id
    }

    /// Record the viewer's preset likes and follows in the indexes so that
    /// they can be undone. Counters are left alone; they already include them.
    fn mirror_viewer_flags(&self) {
        let mut followed = Vec::new();
        for slot in self.videos.iter() {
            let video = &slot.record;
            if video.is_liked {
                self.video_likes
                    .entry(video.id.clone())
                    .or_default()
                    .insert(self.viewer_id.clone());
            }
            if video.is_following {
                followed.push(video.username.clone());
            }
        }

        for username in followed {
            let Some(user_id) = self.user_id_by_username(&username) else {
                continue;
            };
            if !self.is_viewer(&user_id) {
                self.followers
                    .entry(user_id)
                    .or_default()
                    .insert(self.viewer_id.clone());
            }
        }
    }

    /// The preset flags belong to the demo viewer; nobody else has liked or
    /// followed anything yet.
    fn clear_viewer_flags(&self) {
        for mut slot in self.videos.iter_mut() {
            slot.record.is_liked = false;
            slot.record.is_following = false;
        }
    }

    /// Whether the viewer follows the user posting as `username`
    fn viewer_follows(&self, username: &str) -> bool {
        let Some(user_id) = self.user_id_by_username(username) else {
            return false;
        };
        self.followers
            .get(&user_id)
            .map(|followers| followers.contains(&self.viewer_id))
            .unwrap_or(false)
    }

    fn user_id_by_username(&self, username: &str) -> Option<String> {
        self.users
            .iter()
            .find(|slot| slot.record.username == username)
            .map(|slot| slot.key().clone())
    }

    /// Flip `is_following` on every video posted by `username`
    fn set_following_flag(&self, username: &str, following: bool) {
        for mut slot in self.videos.iter_mut() {
            if slot.record.username == username {
                slot.record.is_following = following;
            }
        }
    }

    fn newest_first<T, F>(map: &DashMap<String, Slot<T>>, keep: F) -> Vec<T>
    where
        T: Created + Clone,
        F: Fn(&T) -> bool,
    {
        let mut rows: Vec<(DateTime<Utc>, u64, T)> = map
            .iter()
            .filter(|slot| keep(&slot.record))
            .map(|slot| (slot.record.created_at(), slot.seq, slot.record.clone()))
            .collect();
        rows.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
        rows.into_iter().map(|(_, _, record)| record).collect()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn list_videos(&self) -> Vec<Video> {
        Self::newest_first(&self.videos, |_| true)
    }

    async fn get_video(&self, id: &str) -> Option<Video> {
        self.videos.get(id).map(|slot| slot.record.clone())
    }

    async fn create_video(&self, video: NewVideo) -> Video {
        let mut video = Video::new(new_id(), video);
        // Fresh record: nobody has liked it, and the follow flag comes from the index
        video.is_liked = false;
        video.is_following = self.viewer_follows(&video.username);
        debug!("Creating video {} by {}", video.id, video.username);
        self.insert_video(video.clone());
        video
    }

    async fn update_video(&self, id: &str, patch: VideoPatch) -> Option<Video> {
        let mut slot = self.videos.get_mut(id)?;
        slot.record.apply(patch);
        Some(slot.record.clone())
    }

    async fn delete_video(&self, id: &str) -> bool {
        if self.videos.remove(id).is_none() {
            return false;
        }
        self.video_likes.remove(id);

        let orphaned: Vec<String> = self
            .comments
            .iter()
            .filter(|slot| slot.record.video_id == id)
            .map(|slot| slot.key().clone())
            .collect();
        for comment_id in &orphaned {
            self.comments.remove(comment_id);
            self.comment_likes.remove(comment_id);
        }

        debug!("Deleted video {} and {} comments", id, orphaned.len());
        true
    }

    async fn like_video(&self, video_id: &str, user_id: &str) -> Option<(Video, bool)> {
        let mut slot = self.videos.get_mut(video_id)?;
        let added = self
            .video_likes
            .entry(video_id.to_string())
            .or_default()
            .insert(user_id.to_string());

        if added {
            slot.record.likes += 1;
            if self.is_viewer(user_id) {
                slot.record.is_liked = true;
            }
            debug!("User {} liked video {}", user_id, video_id);
        }

        Some((slot.record.clone(), added))
    }

    async fn unlike_video(&self, video_id: &str, user_id: &str) -> Option<Video> {
        let mut slot = self.videos.get_mut(video_id)?;
        let removed = self
            .video_likes
            .get_mut(video_id)
            .map(|mut likes| likes.remove(user_id))
            .unwrap_or(false);

        if removed {
            slot.record.likes = slot.record.likes.saturating_sub(1);
            if self.is_viewer(user_id) {
                slot.record.is_liked = false;
            }
            debug!("User {} unliked video {}", user_id, video_id);
        }

        Some(slot.record.clone())
    }

    async fn video_liked_by(&self, video_id: &str, user_id: &str) -> bool {
        self.video_likes
            .get(video_id)
            .map(|likes| likes.contains(user_id))
            .unwrap_or(false)
    }

    async fn increment_views(&self, video_id: &str) -> Option<Video> {
        let mut slot = self.videos.get_mut(video_id)?;
        slot.record.views += 1;
        Some(slot.record.clone())
    }

    async fn list_users(&self) -> Vec<User> {
        let mut rows: Vec<(u64, User)> = self
            .users
            .iter()
            .map(|slot| (slot.seq, slot.record.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, user)| user).collect()
    }

    async fn get_user(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|slot| slot.record.clone())
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|slot| slot.record.username == username)
            .map(|slot| slot.record.clone())
    }

    async fn create_user(&self, user: NewUser) -> User {
        let user = User::new(new_id(), user);
        debug!("Creating user {} ({})", user.id, user.username);
        self.insert_user(user.clone());
        user
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Option<User> {
        let mut slot = self.users.get_mut(id)?;
        slot.record.apply(patch);
        Some(slot.record.clone())
    }

    async fn follow_user(&self, follower_id: &str, followee_id: &str) -> bool {
        if follower_id == followee_id {
            return false;
        }

        let added = self
            .followers
            .entry(followee_id.to_string())
            .or_default()
            .insert(follower_id.to_string());
        if !added {
            return false;
        }

        if let Some(mut follower) = self.users.get_mut(follower_id) {
            follower.record.following += 1;
        }
        let followee_name = self.users.get_mut(followee_id).map(|mut followee| {
            followee.record.followers += 1;
            followee.record.username.clone()
        });

        if self.is_viewer(follower_id) {
            if let Some(username) = followee_name {
                self.set_following_flag(&username, true);
            }
        }

        debug!("User {} followed {}", follower_id, followee_id);
        true
    }

    async fn unfollow_user(&self, follower_id: &str, followee_id: &str) -> bool {
        let removed = self
            .followers
            .get_mut(followee_id)
            .map(|mut followers| followers.remove(follower_id))
            .unwrap_or(false);
        if !removed {
            return false;
        }

        if let Some(mut follower) = self.users.get_mut(follower_id) {
            follower.record.following = follower.record.following.saturating_sub(1);
        }
        let followee_name = self.users.get_mut(followee_id).map(|mut followee| {
            followee.record.followers = followee.record.followers.saturating_sub(1);
            followee.record.username.clone()
        });

        if self.is_viewer(follower_id) {
            if let Some(username) = followee_name {
                self.set_following_flag(&username, false);
            }
        }

        debug!("User {} unfollowed {}", follower_id, followee_id);
        true
    }

    async fn is_following(&self, follower_id: &str, followee_id: &str) -> bool {
        self.followers
            .get(followee_id)
            .map(|followers| followers.contains(follower_id))
            .unwrap_or(false)
    }

    async fn list_comments(&self, video_id: &str) -> Vec<Comment> {
        Self::newest_first(&self.comments, |comment| comment.video_id == video_id)
    }

    async fn get_comment(&self, id: &str) -> Option<Comment> {
        self.comments.get(id).map(|slot| slot.record.clone())
    }

    async fn create_comment(&self, comment: NewComment) -> Option<Comment> {
        // Held across the insert so a concurrent delete_video cannot orphan it
        let mut video = self.videos.get_mut(&comment.video_id)?;

        let mut comment = Comment::new(new_id(), comment);
        comment.is_liked = false;
        let seq = self.next_seq();
        self.comments.insert(
            comment.id.clone(),
            Slot {
                seq,
                record: comment.clone(),
            },
        );
        video.record.comments += 1;

        debug!("User {} commented on video {}", comment.user_id, comment.video_id);
        Some(comment)
    }

    async fn like_comment(&self, comment_id: &str, user_id: &str) -> Option<Comment> {
        let mut slot = self.comments.get_mut(comment_id)?;
        let added = self
            .comment_likes
            .entry(comment_id.to_string())
            .or_default()
            .insert(user_id.to_string());

        if added {
            slot.record.likes += 1;
            if self.is_viewer(user_id) {
                slot.record.is_liked = true;
            }
        }

        Some(slot.record.clone())
    }

    async fn unlike_comment(&self, comment_id: &str, user_id: &str) -> Option<Comment> {
        let mut slot = self.comments.get_mut(comment_id)?;
        let removed = self
            .comment_likes
            .get_mut(comment_id)
            .map(|mut likes| likes.remove(user_id))
            .unwrap_or(false);

        if removed {
            slot.record.likes = slot.record.likes.saturating_sub(1);
            if self.is_viewer(user_id) {
                slot.record.is_liked = false;
            }
        }

        Some(slot.record.clone())
    }

    async fn delete_comment(&self, id: &str) -> bool {
        let Some((_, slot)) = self.comments.remove(id) else {
            return false;
        };
        self.comment_likes.remove(id);

        if let Some(mut video) = self.videos.get_mut(&slot.record.video_id) {
            video.record.comments = video.record.comments.saturating_sub(1);
        }

        debug!("Deleted comment {} on video {}", id, slot.record.video_id);
        true
    }

    async fn list_notifications(&self, user_id: &str) -> Vec<Notification> {
        Self::newest_first(&self.notifications, |n| n.user_id == user_id)
    }

    async fn create_notification(&self, notification: NewNotification) -> Notification {
        let notification = Notification::new(new_id(), notification);
        debug!(
            "Notifying user {} ({}) from {}",
            notification.user_id, notification.kind, notification.from_user_id
        );
        let seq = self.next_seq();
        self.notifications.insert(
            notification.id.clone(),
            Slot {
                seq,
                record: notification.clone(),
            },
        );
        notification
    }

    async fn mark_notification_read(&self, id: &str) -> bool {
        match self.notifications.get_mut(id) {
            Some(mut slot) => {
                slot.record.is_read = true;
                true
            }
            None => false,
        }
    }

    async fn mark_all_notifications_read(&self, user_id: &str) -> usize {
        let mut updated = 0;
        for mut slot in self.notifications.iter_mut() {
            if slot.record.user_id == user_id && !slot.record.is_read {
                slot.record.is_read = true;
                updated += 1;
            }
        }
        updated
    }
}
