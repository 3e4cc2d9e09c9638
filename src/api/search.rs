//! Ranked search API endpoint.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::models::Topic;
use crate::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search query string.
    pub q: String,
    /// Maximum number of results (default: 20).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    20
}

/// Search result with topics and metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResultItem>,
    /// Indexed topics matching the query, across all pages.
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Single search result item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub topic: Topic,
    pub score: f32,
}

/// Maximum number of search results allowed.
const MAX_SEARCH_LIMIT: usize = 100;

/// GET /api/forum/search - Ranked full-text search over topics and their replies.
pub async fn search_topics(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<SearchResponse> {
    let limit = params.limit.min(MAX_SEARCH_LIMIT);

    let hits = state.search.search(&params.q, limit, params.offset)?;
    let total = hits.total;

    // One snapshot of the collection serves every hit.
    let topics = state.forum.get_all().await;
    let results: Vec<SearchResultItem> = hits
        .results
        .into_iter()
        .filter_map(|hit| {
            topics
                .iter()
                .find(|t| t.id == hit.topic_id)
                .map(|topic| SearchResultItem {
                    topic: topic.clone(),
                    score: hit.score,
                })
        })
        .collect();

    success(SearchResponse {
        results,
        total,
        limit,
        offset: params.offset,
    })
}
