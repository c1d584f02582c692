//! Demo data loaded at start-up
//!
//! Three creators and one video each. Video 2 is preset as liked by, and its
//! author followed by, the default viewer (user "1").

use chrono::{Duration, Utc};
use reel_types::{User, Video};

/// User the preset `is_liked`/`is_following` flags describe
pub const DEMO_VIEWER_ID: &str = "1";

const AVATAR: &str = "/placeholder-avatar.svg";
const PLACEHOLDER_VIDEO: &str = "/placeholder-video.svg";

pub fn demo_users() -> Vec<User> {
    let now = Utc::now();
    vec![
        User {
            id: "1".to_string(),
            username: "@creativevibe".to_string(),
            display_name: "Creative Vibe ✨".to_string(),
            bio: Some(
                "Digital artist & content creator 🎨\nCreating magic with neon vibes ✨"
                    .to_string(),
            ),
            avatar: AVATAR.to_string(),
            followers: 125_000,
            following: 890,
            total_likes: 2_500_000,
            verified: true,
            created_at: now,
        },
        User {
            id: "2".to_string(),
            username: "@dancequeen".to_string(),
            display_name: "Dance Queen".to_string(),
            bio: Some("Professional dancer & choreographer 💃".to_string()),
            avatar: AVATAR.to_string(),
            followers: 89_000,
            following: 245,
            total_likes: 1_200_000,
            verified: false,
            created_at: now,
        },
        User {
            id: "3".to_string(),
            username: "@techreviewer".to_string(),
            display_name: "Tech Reviewer".to_string(),
            bio: Some("Latest tech reviews & tutorials 📱".to_string()),
            avatar: AVATAR.to_string(),
            followers: 156_000,
            following: 178,
            total_likes: 890_000,
            verified: true,
            created_at: now,
        },
    ]
}

/// Feed videos, staggered an hour apart so that video 1 is the newest
pub fn demo_videos() -> Vec<Video> {
    let now = Utc::now();
    let video = |id: &str,
                 username: &str,
                 caption: &str,
                 music: &str,
                 counters: [u64; 4],
                 liked: bool,
                 following: bool,
                 age_hours: i64| {
        let [likes, comments, shares, views] = counters;
        Video {
            id: id.to_string(),
            username: username.to_string(),
            caption: caption.to_string(),
            music: music.to_string(),
            thumbnail: PLACEHOLDER_VIDEO.to_string(),
            video_url: PLACEHOLDER_VIDEO.to_string(),
            likes,
            comments,
            shares,
            views,
            is_liked: liked,
            is_following: following,
            created_at: now - Duration::hours(age_hours),
        }
    };

    vec![
        video(
            "1",
            "@creativevibe",
            "Creating magic with neon lights ✨ This took me hours but totally worth it! #neonvibes #creative #art",
            "Electric Dreams - Neon Beats",
            [15_420, 342, 89, 128_000],
            false,
            false,
            0,
        ),
        video(
            "2",
            "@dancequeen",
            "New dance routine! What do you think? 💃 #dance #choreography #viral",
            "Upbeat Dance Mix - DJ Flow",
            [23_100, 567, 234, 245_000],
            true,
            true,
            1,
        ),
        video(
            "3",
            "@techreviewer",
            "iPhone 15 Pro Max review! Is it worth the upgrade? 📱 #tech #review #iphone",
            "Tech Vibes - Electronic",
            [8_930, 445, 156, 89_000],
            false,
            false,
            2,
        ),
    ]
}
