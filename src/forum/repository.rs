//! Topic repository over the key-value storage port.
//!
//! The whole topic collection lives in one JSON document. Reads decode the full document and
//! writes replace it, so every mutation is a read-modify-write of the entire collection.

use std::sync::Arc;

use super::TOPICS_KEY;
use crate::errors::AppError;
use crate::models::Topic;
use crate::storage::KeyValueStore;

/// Sole read/write boundary for the persisted topic collection.
pub struct TopicRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for TopicRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> TopicRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All topics in creation order.
    ///
    /// Unavailable storage, an unset key and an undecodable document all read as no topics.
    pub async fn get_all(&self) -> Vec<Topic> {
        self.load().await.unwrap_or_else(|e| {
            tracing::warn!("Reading forum topics failed: {}", e);
            Vec::new()
        })
    }

    /// All topics, failing when storage is unreadable or the document does not decode.
    ///
    /// An unset key is an empty collection. Writers load through here so that a failed read is
    /// never saved back over the stored topics.
    pub async fn load(&self) -> Result<Vec<Topic>, AppError> {
        let Some(raw) = self.read_raw().await? else {
            return Ok(Vec::new());
        };

        let mut topics: Vec<Topic> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Storage(format!("Stored forum topics are not decodable: {}", e))
        })?;
        topics.iter_mut().for_each(Topic::backfill);
        Ok(topics)
    }

    /// Find a topic by id.
    pub async fn get_by_id(&self, id: &str) -> Option<Topic> {
        self.get_all().await.into_iter().find(|t| t.id == id)
    }

    /// Replace the whole persisted collection.
    pub async fn save(&self, topics: &[Topic]) {
        let json = match serde_json::to_string(topics) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Encoding forum topics failed: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.write(TOPICS_KEY, &json).await {
            tracing::warn!("Saving forum topics failed: {}", e);
        }
    }

    /// The stored document as text, distinguishing "never written" from storage failure.
    pub(crate) async fn read_raw(&self) -> Result<Option<String>, AppError> {
        self.store.read(TOPICS_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forum::seed::default_topics;
    use crate::storage::MemoryStore;

    fn repo() -> (Arc<MemoryStore>, TopicRepository<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), TopicRepository::new(store))
    }

    #[tokio::test]
    async fn test_get_all_unset_is_empty() {
        let (_, repo) = repo();
        assert!(repo.get_all().await.is_empty());
        assert!(repo.get_by_id("1").await.is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_collection() {
        let (_, repo) = repo();
        let topics = default_topics();

        repo.save(&topics).await;
        assert_eq!(repo.get_all().await, topics);

        repo.save(&topics[1..]).await;
        let ids: Vec<String> = repo.get_all().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["2".to_string()]);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (_, repo) = repo();
        repo.save(&default_topics()).await;

        let topic = repo.get_by_id("2").await.unwrap();
        assert_eq!(topic.view_count, 189);
        assert!(repo.get_by_id("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_document_reads_empty() {
        let (store, repo) = repo();
        store.write(TOPICS_KEY, "{not json").await.unwrap();

        assert!(repo.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_reports_failures() {
        let (store, repo) = repo();
        assert!(repo.load().await.unwrap().is_empty());

        store.write(TOPICS_KEY, r#"[{"id":"1","views":null}]"#).await.unwrap();
        assert!(matches!(repo.load().await, Err(AppError::Storage(_))));

        store.set_available(false);
        assert!(repo.load().await.is_err());
    }

    #[tokio::test]
    async fn test_old_documents_are_backfilled() {
        let (store, repo) = repo();
        store
            .write(
                TOPICS_KEY,
                r#"[{"id":"9","title":"Legacy","content":"x","category":"Research Methodologies","createdAt":"May 1, 2025","views":4,"likes":1,"tags":["Grants"],"replies":[],"liked":true}]"#,
            )
            .await
            .unwrap();

        let topics = repo.get_all().await;
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].category_slug, "research-methodologies");
        assert_eq!(topics[0].view_count, 4);
    }

    #[tokio::test]
    async fn test_unavailable_storage() {
        let store = Arc::new(MemoryStore::unavailable());
        let repo = TopicRepository::new(store.clone());

        repo.save(&default_topics()).await;
        assert!(repo.get_all().await.is_empty());

        store.set_available(true);
        assert_eq!(store.snapshot(TOPICS_KEY), None);
    }

    #[tokio::test]
    async fn test_interleaved_writes_lose_updates() {
        let (_, repo) = repo();
        repo.save(&default_topics()).await;

        // Two writers read the same snapshot before either saves.
        let mut first = repo.get_all().await;
        let mut second = repo.get_all().await;

        first[0].view_count += 1;
        second[1].like_count += 1;

        repo.save(&first).await;
        repo.save(&second).await;

        let topics = repo.get_all().await;
        assert_eq!(topics[0].view_count, 342);
        assert_eq!(topics[1].like_count, 4);
    }
}
