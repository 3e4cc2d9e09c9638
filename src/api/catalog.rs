//! Category and tag catalog endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::{CategorySummary, TagSummary};
use crate::AppState;

/// GET /api/forum/categories - Category catalog with topic and post counts.
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<CategorySummary>> {
    success(state.forum.list_categories().await)
}

/// GET /api/forum/tags - Suggested and in-use tags with usage counts.
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Vec<TagSummary>> {
    success(state.forum.list_tags().await)
}
