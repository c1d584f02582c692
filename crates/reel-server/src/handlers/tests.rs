use crate::storage::MemoryStorage;
use crate::{build_router, handle_panic, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let storage = Arc::new(MemoryStorage::seeded("1"));
    build_router(AppState::new(storage), None)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

fn upload() -> Value {
    json!({
        "username": "@creativevibe",
        "caption": "Behind the scenes 🎬",
        "music": "Original sound",
        "thumbnail": "/placeholder-video.svg",
        "videoUrl": "/placeholder-video.svg"
    })
}

fn comment(content: &str) -> Value {
    json!({
        "userId": "2",
        "username": "@dancequeen",
        "avatar": "/placeholder-avatar.svg",
        "content": content
    })
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_videos_newest_first() {
    let app = app();
    let (status, body) = post(&app, "/api/videos", upload()).await;
    assert_eq!(status, StatusCode::CREATED);
    let new_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = get(&app, "/api/videos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![new_id.as_str(), "1", "2", "3"]);
}

#[tokio::test]
async fn test_created_video_has_zero_counters() {
    let (status, body) = post(&app(), "/api/videos", upload()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["likes"], 0);
    assert_eq!(body["data"]["views"], 0);
    assert_eq!(body["data"]["videoUrl"], "/placeholder-video.svg");
}

#[tokio::test]
async fn test_create_video_validation() {
    let app = app();

    let (status, body) = post(&app, "/api/videos", json!({"username": "@x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let mut blank = upload();
    blank["caption"] = json!("   ");
    let (status, body) = post(&app, "/api/videos", blank).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "caption must not be blank");
}

#[tokio::test]
async fn test_malformed_json() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/videos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_video() {
    let (status, body) = get(&app(), "/api/videos/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Video not found"}));
}

#[tokio::test]
async fn test_like_twice_counts_once() {
    let app = app();

    let (status, body) = post(&app, "/api/videos/1/like", json!({"userId": "3"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["likes"], 15_421);

    let (_, body) = post(&app, "/api/videos/1/like", json!({"userId": "3"})).await;
    assert_eq!(body["data"]["likes"], 15_421);
}

#[tokio::test]
async fn test_like_requires_user() {
    let app = app();

    let (status, body) = post(&app, "/api/videos/1/like", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID is required");

    let (status, _) = post(&app, "/api/videos/missing/like", json!({"userId": "3"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unlike_not_liked_is_unchanged() {
    let (status, body) = post(&app(), "/api/videos/3/unlike", json!({"userId": "2"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["likes"], 8_930);
}

#[tokio::test]
async fn test_view_increments() {
    let (status, body) = send(&app(), Method::POST, "/api/videos/3/view", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["views"], 89_001);
}

#[tokio::test]
async fn test_update_and_delete_video() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/videos/1",
        Some(json!({"caption": "edited", "likes": 999999})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["caption"], "edited");
    // counters are not patchable
    assert_eq!(body["data"]["likes"], 15_420);

    let (status, body) = send(&app, Method::DELETE, "/api/videos/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], true);

    let (status, _) = send(&app, Method::DELETE, "/api/videos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_follow_unfollow_round_trip() {
    let app = app();

    let (status, body) = post(&app, "/api/users/1/follow", json!({"followerId": "3"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["success"], true);

    let (_, followee) = get(&app, "/api/users/1").await;
    let (_, follower) = get(&app, "/api/users/3").await;
    assert_eq!(followee["data"]["followers"], 125_001);
    assert_eq!(follower["data"]["following"], 179);

    let (status, _) = post(&app, "/api/users/1/follow", json!({"followerId": "3"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/users/1/unfollow", json!({"followerId": "3"})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, followee) = get(&app, "/api/users/1").await;
    let (_, follower) = get(&app, "/api/users/3").await;
    assert_eq!(followee["data"]["followers"], 125_000);
    assert_eq!(follower["data"]["following"], 178);

    let (status, body) = post(&app, "/api/users/1/unfollow", json!({"followerId": "3"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot unfollow user");
}

#[tokio::test]
async fn test_self_follow_rejected() {
    let app = app();
    let (status, body) = post(&app, "/api/users/2/follow", json!({"followerId": "2"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot follow user");

    let (status, body) = post(&app, "/api/users/2/follow", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Follower ID is required");
}

#[tokio::test]
async fn test_users() {
    let app = app();

    let (_, body) = get(&app, "/api/users").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = get(&app, "/api/users?username=@dancequeen").await;
    let matches = body["data"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], "2");

    let (status, _) = get(&app, "/api/users/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_and_patch_user() {
    let app = app();
    let signup = json!({
        "username": "@newcomer",
        "displayName": "New Comer",
        "avatar": "/placeholder-avatar.svg"
    });

    let (status, body) = post(&app, "/api/users", signup.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["followers"], 0);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(&app, "/api/users", signup).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/users/{}", id),
        Some(json!({"bio": "just joined"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bio"], "just joined");
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let app = app();

    let (status, body) = post(&app, "/api/videos/1/comments", comment("so good")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["videoId"], "1");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, video) = get(&app, "/api/videos/1").await;
    assert_eq!(video["data"]["comments"], 343);

    let (_, list) = get(&app, "/api/videos/1/comments").await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let (status, body) = post(
        &app,
        &format!("/api/comments/{}/like", id),
        json!({"userId": "1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["likes"], 1);
    assert_eq!(body["data"]["isLiked"], true);

    let (_, body) = post(
        &app,
        &format!("/api/comments/{}/unlike", id),
        json!({"userId": "1"}),
    )
    .await;
    assert_eq!(body["data"]["likes"], 0);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/comments/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, video) = get(&app, "/api/videos/1").await;
    assert_eq!(video["data"]["comments"], 342);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/comments/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_validation() {
    let app = app();

    let (status, body) = post(&app, "/api/videos/1/comments", comment("")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "content must not be blank");

    let (status, body) = post(&app, "/api/videos/missing/comments", comment("hi")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Video not found");

    let (status, _) = post(&app, "/api/comments/missing/like", json!({"userId": "1"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inbox() {
    let app = app();

    post(&app, "/api/users/1/follow", json!({"followerId": "2"})).await;
    post(&app, "/api/videos/1/comments", comment("amazing colors")).await;

    let (status, body) = get(&app, "/api/notifications/1").await;
    assert_eq!(status, StatusCode::OK);
    let inbox = body["data"].as_array().unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0]["type"], "comment");
    assert_eq!(inbox[1]["type"], "follow");
    assert_eq!(inbox[0]["isRead"], false);

    let id = inbox[1]["id"].as_str().unwrap().to_string();
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/notifications/{}/read", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["success"], true);

    let (_, body) = send(&app, Method::POST, "/api/users/1/notifications/read", None).await;
    assert_eq!(body["data"]["updated"], 1);

    let (status, _) = send(&app, Method::POST, "/api/notifications/missing/read", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_notification() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/notifications",
        json!({
            "type": "mention",
            "userId": "3",
            "fromUserId": "1",
            "fromUsername": "@creativevibe",
            "fromAvatar": "/placeholder-avatar.svg",
            "content": "mentioned you in a comment",
            "videoId": "1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "mention");

    let (status, _) = post(
        &app,
        "/api/notifications",
        json!({"type": "poke", "userId": "3"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_stats() {
    let (status, body) = get(&app(), "/api/admin/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalUsers"], 3);
    assert_eq!(body["data"]["totalVideos"], 3);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get(&app(), "/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[test]
fn test_panic_renders_internal_error() {
    let resp = handle_panic(Box::new("boom"));
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
