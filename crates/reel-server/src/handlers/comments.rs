//! Comment handlers

use super::{created, ok, ApiResult, Created, Deleted, LikeRequest};
use crate::error::AppError;
use crate::extractors::ValidJson;
use crate::AppState;
use axum::extract::{Path, State};
use reel_types::{Comment, CommentBody};

pub async fn list(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Vec<Comment>> {
    ok(state.storage.list_comments(&video_id).await)
}

pub async fn create(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    ValidJson(body): ValidJson<CommentBody>,
) -> Created<Comment> {
    let comment = state
        .activity
        .comment(&video_id, body)
        .await
        .ok_or(AppError::NotFound("Video"))?;
    created(comment)
}

pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<LikeRequest>,
) -> ApiResult<Comment> {
    let comment = state
        .storage
        .like_comment(&id, req.user_id())
        .await
        .ok_or(AppError::NotFound("Comment"))?;
    ok(comment)
}

pub async fn unlike(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<LikeRequest>,
) -> ApiResult<Comment> {
    let comment = state
        .storage
        .unlike_comment(&id, req.user_id())
        .await
        .ok_or(AppError::NotFound("Comment"))?;
    ok(comment)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    if !state.storage.delete_comment(&id).await {
        return Err(AppError::NotFound("Comment"));
    }
    ok(Deleted { deleted: true })
}
