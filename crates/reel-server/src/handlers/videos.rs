//! Video handlers

use super::{created, ok, ApiResult, Created, Deleted, LikeRequest};
use crate::error::AppError;
use crate::extractors::ValidJson;
use crate::AppState;
use axum::extract::{Path, State};
use reel_types::{NewVideo, Video, VideoPatch};
use tracing::info;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Video>> {
    ok(state.storage.list_videos().await)
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Video> {
    let video = state
        .storage
        .get_video(&id)
        .await
        .ok_or(AppError::NotFound("Video"))?;
    ok(video)
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<NewVideo>,
) -> Created<Video> {
    let video = state.storage.create_video(req).await;
    info!("Video {} uploaded by {}", video.id, video.username);
    created(video)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<VideoPatch>,
) -> ApiResult<Video> {
    let video = state
        .storage
        .update_video(&id, patch)
        .await
        .ok_or(AppError::NotFound("Video"))?;
    ok(video)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    if !state.storage.delete_video(&id).await {
        return Err(AppError::NotFound("Video"));
    }
    info!("Video {} deleted", id);
    ok(Deleted { deleted: true })
}

pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<LikeRequest>,
) -> ApiResult<Video> {
    let video = state
        .activity
        .like_video(&id, req.user_id())
        .await
        .ok_or(AppError::NotFound("Video"))?;
    ok(video)
}

pub async fn unlike(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<LikeRequest>,
) -> ApiResult<Video> {
    let video = state
        .storage
        .unlike_video(&id, req.user_id())
        .await
        .ok_or(AppError::NotFound("Video"))?;
    ok(video)
}

pub async fn view(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Video> {
    let video = state
        .storage
        .increment_views(&id)
        .await
        .ok_or(AppError::NotFound("Video"))?;
    ok(video)
}
