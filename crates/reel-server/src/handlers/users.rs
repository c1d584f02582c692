//! User handlers

use super::{created, ok, ApiResult, Created};
use crate::error::AppError;
use crate::extractors::ValidJson;
use crate::AppState;
use axum::extract::{Path, Query, State};
use reel_types::{require_id, Ack, NewUser, User, UserPatch, Validate, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    username: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Vec<User>> {
    match query.username {
        Some(username) => ok(state
            .storage
            .get_user_by_username(&username)
            .await
            .into_iter()
            .collect()),
        None => ok(state.storage.list_users().await),
    }
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let user = state
        .storage
        .get_user(&id)
        .await
        .ok_or(AppError::NotFound("User"))?;
    ok(user)
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<NewUser>,
) -> Created<User> {
    if state
        .storage
        .get_user_by_username(&req.username)
        .await
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Username {} is already taken",
            req.username
        )));
    }

    let user = state.storage.create_user(req).await;
    info!("User {} registered as {}", user.id, user.username);
    created(user)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<UserPatch>,
) -> ApiResult<User> {
    let user = state
        .storage
        .update_user(&id, patch)
        .await
        .ok_or(AppError::NotFound("User"))?;
    ok(user)
}

/// Body of follow/unfollow requests
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    follower_id: Option<String>,
}

impl FollowRequest {
    fn follower_id(&self) -> &str {
        self.follower_id.as_deref().unwrap_or_default()
    }
}

impl Validate for FollowRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_id("Follower ID", self.follower_id.as_deref()).map(|_| ())
    }
}

pub async fn follow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<FollowRequest>,
) -> ApiResult<Ack> {
    if !state.activity.follow(req.follower_id(), &id).await {
        return Err(AppError::BadRequest("Cannot follow user".to_string()));
    }
    info!("User {} now follows {}", req.follower_id(), id);
    ok(Ack::ok())
}

pub async fn unfollow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<FollowRequest>,
) -> ApiResult<Ack> {
    if !state.storage.unfollow_user(req.follower_id(), &id).await {
        return Err(AppError::BadRequest("Cannot unfollow user".to_string()));
    }
    info!("User {} unfollowed {}", req.follower_id(), id);
    ok(Ack::ok())
}

#[derive(Debug, Serialize)]
pub struct ReadAllResponse {
    updated: usize,
}

/// Mark every notification of a user as read
pub async fn read_all_notifications(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ReadAllResponse> {
    let updated = state.storage.mark_all_notifications_read(&id).await;
    ok(ReadAllResponse { updated })
}
