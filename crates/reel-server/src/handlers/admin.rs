//! Admin dashboard handlers

use super::{ok, ApiResult};
use crate::services::stats::DashboardStats;
use crate::AppState;
use axum::extract::State;

pub async fn stats(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    ok(state.stats.snapshot().await)
}
