//! Forum data store.
//!
//! Topics, their replies and the like ledger are JSON documents in a [`KeyValueStore`].
//! [`ForumStore`] is the only sanctioned way to reach them: reads go through the
//! [`TopicRepository`], mutations additionally hold a write gate so that concurrent requests in
//! this process never overwrite each other's read-modify-write.

pub mod dates;
mod likes;
mod mutations;
mod projection;
mod repository;
mod seed;

pub use likes::LikeMode;
pub use projection::SortOrder;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::{CategorySummary, TagSummary, Topic};
use crate::storage::KeyValueStore;
use likes::LikeLedger;
use repository::TopicRepository;
use projection::{category_summaries, filter_by_category, list_topics, tag_summaries};

/// Storage key of the topic collection.
pub const TOPICS_KEY: &str = "forumTopics";
/// Storage key of the like ledger.
pub const LIKES_KEY: &str = "forumTopicLikes";

/// Forum operations over one storage backend.
pub struct ForumStore<S> {
    topics: TopicRepository<S>,
    likes: LikeLedger<S>,
    like_mode: LikeMode,
    write_gate: Mutex<()>,
}

impl<S: KeyValueStore> ForumStore<S> {
    pub fn new(store: Arc<S>, like_mode: LikeMode) -> Self {
        Self {
            topics: TopicRepository::new(Arc::clone(&store)),
            likes: LikeLedger::new(store),
            like_mode,
            write_gate: Mutex::new(()),
        }
    }

    pub fn like_mode(&self) -> LikeMode {
        self.like_mode
    }

    /// Seed default content if the store has never been written.
    pub async fn ensure_initialized(&self) {
        let _guard = self.write_gate.lock().await;
        seed::ensure_initialized(&self.topics).await;
    }

    /// All topics in creation order.
    pub async fn get_all(&self) -> Vec<Topic> {
        self.topics.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Topic> {
        self.topics.get_by_id(id).await
    }

    /// Sorted, optionally filtered topic list. Never writes.
    pub async fn list_topics(
        &self,
        sort: SortOrder,
        query: Option<&str>,
        category: Option<&str>,
    ) -> Vec<Topic> {
        let mut topics = self.topics.get_all().await;
        if let Some(slug) = category.map(str::trim).filter(|s| !s.is_empty()) {
            topics = filter_by_category(topics, slug);
        }
        list_topics(&topics, sort, query)
    }

    pub async fn list_categories(&self) -> Vec<CategorySummary> {
        category_summaries(&self.topics.get_all().await)
    }

    pub async fn list_tags(&self) -> Vec<TagSummary> {
        tag_summaries(&self.topics.get_all().await)
    }
}
