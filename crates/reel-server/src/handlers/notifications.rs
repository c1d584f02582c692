//! Notification handlers

use super::{created, ok, ApiResult, Created};
use crate::error::AppError;
use crate::extractors::ValidJson;
use crate::AppState;
use axum::extract::{Path, State};
use reel_types::{Ack, NewNotification, Notification};

/// Inbox of user `user_id`, newest first
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<Notification>> {
    ok(state.storage.list_notifications(&user_id).await)
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<NewNotification>,
) -> Created<Notification> {
    created(state.storage.create_notification(req).await)
}

pub async fn mark_read(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Ack> {
    if !state.storage.mark_notification_read(&id).await {
        return Err(AppError::NotFound("Notification"));
    }
    ok(Ack::ok())
}
