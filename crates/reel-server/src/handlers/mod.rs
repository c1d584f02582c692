//! HTTP handlers

pub mod admin;
pub mod comments;
pub mod health;
pub mod notifications;
pub mod users;
pub mod videos;

#[cfg(test)]
mod tests;

pub use health::health;

use crate::error::AppError;
use axum::{http::StatusCode, Json};
use reel_types::{require_id, ApiResponse, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Successful envelope, or the error envelope on failure
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// 201 envelope for creation endpoints
pub type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

pub fn created<T>(data: T) -> Created<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// Body of like/unlike requests: the acting user
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    user_id: Option<String>,
}

impl LikeRequest {
    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or_default()
    }
}

impl Validate for LikeRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_id("User ID", self.user_id.as_deref()).map(|_| ())
    }
}

/// Unmatched routes still answer with the envelope
pub async fn not_found() -> AppError {
    AppError::NotFound("Route")
}
