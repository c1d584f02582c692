//! Admin dashboard totals

use crate::storage::Storage;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub verified_users: usize,
    pub total_videos: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
}

pub struct StatsService {
    storage: Arc<dyn Storage>,
}

impl StatsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn snapshot(&self) -> DashboardStats {
        let users = self.storage.list_users().await;
        let videos = self.storage.list_videos().await;

        let mut stats = DashboardStats {
            total_users: users.len(),
            verified_users: users.iter().filter(|u| u.verified).count(),
            total_videos: videos.len(),
            ..Default::default()
        };
        for video in &videos {
            stats.total_views += video.views;
            stats.total_likes += video.likes;
            stats.total_comments += video.comments;
            stats.total_shares += video.shares;
        }
        stats
    }
}
