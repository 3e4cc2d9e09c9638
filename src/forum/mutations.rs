//! Topic, reply, view and like mutations.
//!
//! Each mutation reads the whole collection, changes it in memory and saves it back while
//! holding the store's write gate.

use uuid::Uuid;

use super::likes::LikeTarget;
use super::{ForumStore, LikeMode};
use crate::errors::AppError;
use crate::models::{slugify, NewReply, NewTopic, Reply, Topic};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> ForumStore<S> {
    /// Create a topic and append it to the collection.
    ///
    /// Title, content, category and at least one tag are required; on a validation failure
    /// nothing is written. Blank tags are dropped.
    pub async fn create_topic(&self, mut new: NewTopic) -> Result<Topic, AppError> {
        validate_topic(&new)?;
        new.tags.retain(|tag| !tag.trim().is_empty());

        let _guard = self.write_gate.lock().await;
        let loaded = self.load_for_update().await;

        let topic = Topic {
            id: fresh_id(|id| loaded.iter().flatten().any(|t| t.id == id)),
            category_slug: slugify(&new.category),
            title: new.title,
            content: new.content,
            author: new.author,
            category: new.category,
            created_at_label: new.created_at_label,
            view_count: 1,
            like_count: 0,
            tags: new.tags,
            replies: Vec::new(),
        };

        if let Some(mut topics) = loaded {
            topics.push(topic.clone());
            self.topics.save(&topics).await;
        }

        tracing::info!("Created forum topic {} in {}", topic.id, topic.category_slug);
        Ok(topic)
    }

    /// Append a reply to a topic.
    ///
    /// Returns `Ok(None)` when the topic does not exist.
    pub async fn add_reply(
        &self,
        topic_id: &str,
        new: NewReply,
    ) -> Result<Option<Reply>, AppError> {
        if new.content.trim().is_empty() {
            return Err(AppError::Validation("Please enter a reply".to_string()));
        }

        let _guard = self.write_gate.lock().await;
        let Some(mut topics) = self.load_for_update().await else {
            return Ok(None);
        };

        let Some(topic) = topics.iter_mut().find(|t| t.id == topic_id) else {
            return Ok(None);
        };

        let reply = Reply {
            id: fresh_id(|id| topic.replies.iter().any(|r| r.id == id)),
            author: new.author,
            content: new.content,
            created_at_label: new.created_at_label,
            like_count: 0,
        };
        topic.replies.push(reply.clone());

        self.topics.save(&topics).await;

        tracing::debug!("Added reply {} to topic {}", reply.id, topic_id);
        Ok(Some(reply))
    }

    /// Count one visit to a topic. Returns the new view count.
    pub async fn increment_topic_views(&self, topic_id: &str) -> Option<u64> {
        let _guard = self.write_gate.lock().await;
        let mut topics = self.load_for_update().await?;

        let topic = topics.iter_mut().find(|t| t.id == topic_id)?;
        topic.view_count += 1;
        let views = topic.view_count;

        self.topics.save(&topics).await;
        Some(views)
    }

    /// Like a topic. Returns the resulting like count.
    pub async fn toggle_topic_like(&self, topic_id: &str, user_id: &str) -> Option<u64> {
        let _guard = self.write_gate.lock().await;
        let mut topics = self.load_for_update().await?;

        let topic = topics.iter_mut().find(|t| t.id == topic_id)?;

        let target = LikeTarget::Topic {
            topic_id: topic_id.to_string(),
        };
        if !self.admit_like(target, user_id).await {
            return Some(topic.like_count);
        }

        topic.like_count += 1;
        let likes = topic.like_count;

        self.topics.save(&topics).await;
        Some(likes)
    }

    /// Like a reply. Returns the resulting like count.
    pub async fn toggle_reply_like(
        &self,
        topic_id: &str,
        reply_id: &str,
        user_id: &str,
    ) -> Option<u64> {
        let _guard = self.write_gate.lock().await;
        let mut topics = self.load_for_update().await?;

        let reply = topics
            .iter_mut()
            .find(|t| t.id == topic_id)?
            .reply_mut(reply_id)?;

        let target = LikeTarget::Reply {
            topic_id: topic_id.to_string(),
            reply_id: reply_id.to_string(),
        };
        if !self.admit_like(target, user_id).await {
            return Some(reply.like_count);
        }

        reply.like_count += 1;
        let likes = reply.like_count;

        self.topics.save(&topics).await;
        Some(likes)
    }

    /// The current collection for a read-modify-write, or `None` when it cannot be read.
    async fn load_for_update(&self) -> Option<Vec<Topic>> {
        match self.topics.load().await {
            Ok(topics) => Some(topics),
            Err(e) => {
                tracing::warn!("Skipping forum update, topics unreadable: {}", e);
                None
            }
        }
    }

    /// Whether a like should be counted under the configured mode.
    async fn admit_like(&self, target: LikeTarget, user_id: &str) -> bool {
        match self.like_mode {
            LikeMode::Increment => true,
            LikeMode::OncePerUser => self.likes.record(target, user_id).await,
        }
    }
}

fn validate_topic(new: &NewTopic) -> Result<(), AppError> {
    if new.title.trim().is_empty() {
        return Err(AppError::Validation("Please enter a title".to_string()));
    }
    if new.content.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter discussion content".to_string(),
        ));
    }
    if new.category.trim().is_empty() {
        return Err(AppError::Validation("Please select a category".to_string()));
    }
    if new.tags.iter().all(|tag| tag.trim().is_empty()) {
        return Err(AppError::Validation(
            "Please select at least one tag".to_string(),
        ));
    }
    Ok(())
}

/// Time-ordered id not already used in its scope.
fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = Uuid::now_v7().to_string();
        if !taken(&id) {
            return id;
        }
    }
}
