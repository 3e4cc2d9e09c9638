//! Topic and reply models matching the persisted forum document.

use serde::{Deserialize, Serialize};

use super::{slugify, Author};

/// A reply attached to exactly one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "createdAt")]
    pub created_at_label: String,
    #[serde(default, rename = "likes")]
    pub like_count: u64,
}

/// A top-level discussion entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub category: String,
    /// Stable identifier derived from the category when the topic was created.
    #[serde(default)]
    pub category_slug: String,
    #[serde(default, rename = "createdAt")]
    pub created_at_label: String,
    #[serde(default, rename = "views")]
    pub view_count: u64,
    #[serde(default, rename = "likes")]
    pub like_count: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Topic {
    /// Popularity score used by the "popular" ordering.
    pub fn popularity(&self) -> u64 {
        self.like_count + self.replies.len() as u64
    }

    pub fn reply_mut(&mut self, reply_id: &str) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| r.id == reply_id)
    }

    /// Fill in fields that older documents did not store.
    pub(crate) fn backfill(&mut self) {
        if self.category_slug.is_empty() && !self.category.is_empty() {
            self.category_slug = slugify(&self.category);
        }
    }
}

/// Validated input for creating a topic.
#[derive(Debug, Clone)]
pub struct NewTopic {
    pub title: String,
    pub content: String,
    pub author: Author,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at_label: String,
}

/// Input for appending a reply.
#[derive(Debug, Clone)]
pub struct NewReply {
    pub author: Author,
    pub content: String,
    pub created_at_label: String,
}

/// Request body for creating a new topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub author: Author,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display date label; stamped by the server when absent.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request body for posting a reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    pub author: Author,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request body for liking a topic or reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    /// Only consulted in once-per-user mode.
    #[serde(default)]
    pub user_id: String,
}

/// Like counter after a like request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeCount {
    pub likes: u64,
}

/// View counter after a recorded visit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCount {
    pub views: u64,
}
