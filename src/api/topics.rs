//! Topic and reply API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::forum::{dates, LikeMode, SortOrder};
use crate::models::{
    CreateReplyRequest, CreateTopicRequest, LikeCount, LikeRequest, NewReply, NewTopic, Reply,
    Topic, ViewCount,
};
use crate::AppState;

/// Topic list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct TopicListQuery {
    #[serde(default)]
    pub sort: SortOrder,
    /// Case-insensitive substring filter over title, content and tags.
    #[serde(default)]
    pub q: Option<String>,
    /// Category slug.
    #[serde(default)]
    pub category: Option<String>,
}

/// GET /api/forum/topics - List topics, sorted and filtered.
pub async fn list_topics(
    State(state): State<AppState>,
    Query(params): Query<TopicListQuery>,
) -> ApiResult<Vec<Topic>> {
    let topics = state
        .forum
        .list_topics(params.sort, params.q.as_deref(), params.category.as_deref())
        .await;
    success(topics)
}

/// GET /api/forum/topics/{id} - Get a single topic.
pub async fn get_topic(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Topic> {
    match state.forum.get_by_id(&id).await {
        Some(topic) => success(topic),
        None => Err(topic_not_found(&id)),
    }
}

/// POST /api/forum/topics - Create a new topic.
pub async fn create_topic(
    State(state): State<AppState>,
    Json(request): Json<CreateTopicRequest>,
) -> ApiResult<Topic> {
    let new = NewTopic {
        title: request.title,
        content: request.content,
        author: request.author,
        category: request.category,
        tags: request.tags,
        created_at_label: label_or_today(request.created_at),
    };

    let topic = state.forum.create_topic(new).await?;
    reindex(&state, &topic).await;

    success(topic)
}

/// POST /api/forum/topics/{id}/views - Record one visit to a topic.
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ViewCount> {
    match state.forum.increment_topic_views(&id).await {
        Some(views) => success(ViewCount { views }),
        None => Err(topic_not_found(&id)),
    }
}

/// POST /api/forum/topics/{id}/replies - Append a reply.
pub async fn add_reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateReplyRequest>,
) -> ApiResult<Reply> {
    let new = NewReply {
        author: request.author,
        content: request.content,
        created_at_label: label_or_today(request.created_at),
    };

    let reply = state
        .forum
        .add_reply(&id, new)
        .await?
        .ok_or_else(|| topic_not_found(&id))?;

    if let Some(topic) = state.forum.get_by_id(&id).await {
        reindex(&state, &topic).await;
    }

    success(reply)
}

/// POST /api/forum/topics/{id}/like - Like a topic.
pub async fn like_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<LikeRequest>,
) -> ApiResult<LikeCount> {
    check_user(&state, &request)?;

    match state.forum.toggle_topic_like(&id, &request.user_id).await {
        Some(likes) => success(LikeCount { likes }),
        None => Err(topic_not_found(&id)),
    }
}

/// POST /api/forum/topics/{id}/replies/{reply_id}/like - Like a reply.
pub async fn like_reply(
    State(state): State<AppState>,
    Path((id, reply_id)): Path<(String, String)>,
    Json(request): Json<LikeRequest>,
) -> ApiResult<LikeCount> {
    check_user(&state, &request)?;

    match state
        .forum
        .toggle_reply_like(&id, &reply_id, &request.user_id)
        .await
    {
        Some(likes) => success(LikeCount { likes }),
        None => Err(AppError::NotFound(format!(
            "Reply {} not found in topic {}",
            reply_id, id
        ))),
    }
}

fn topic_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Topic {} not found", id))
}

fn label_or_today(label: Option<String>) -> String {
    label
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(dates::today_label)
}

/// Once-per-user likes are keyed on the user, so an anonymous like cannot be admitted.
fn check_user(state: &AppState, request: &LikeRequest) -> Result<(), AppError> {
    if state.forum.like_mode() == LikeMode::OncePerUser && request.user_id.trim().is_empty() {
        return Err(AppError::Validation("userId is required".to_string()));
    }
    Ok(())
}

async fn reindex(state: &AppState, topic: &Topic) {
    if let Err(e) = state.search.index_topic(topic).await {
        tracing::warn!("Failed to index topic {}: {}", topic.id, e);
    }
}
