//! Default forum content written on first use.

use super::repository::TopicRepository;
use crate::models::{Author, Reply, Topic, DEFAULT_AVATAR};
use crate::storage::KeyValueStore;

/// Seed the topic collection when nothing has been stored yet.
///
/// An existing collection is never touched, even when it is empty. Storage failures are
/// logged and otherwise ignored.
pub async fn ensure_initialized<S: KeyValueStore>(repo: &TopicRepository<S>) {
    match repo.read_raw().await {
        Ok(Some(_)) => {
            tracing::debug!("Forum topics already initialized");
        }
        Ok(None) => {
            let topics = default_topics();
            repo.save(&topics).await;
            tracing::info!("Seeded forum with {} default topics", topics.len());
        }
        Err(e) => {
            tracing::warn!("Skipping forum initialization, storage unavailable: {}", e);
        }
    }
}

fn author(id: &str, name: &str, department: &str, join_date: &str) -> Author {
    Author {
        id: id.to_string(),
        display_name: name.to_string(),
        avatar_ref: DEFAULT_AVATAR.to_string(),
        affiliation: department.to_string(),
        join_label: join_date.to_string(),
    }
}

/// The fixed default topic set.
pub fn default_topics() -> Vec<Topic> {
    vec![
        Topic {
            id: "1".to_string(),
            title: "Machine Learning approaches for climate data analysis".to_string(),
            content: "I'm working on a research project that involves analyzing large sets of \
                climate data to identify patterns and make predictions about future climate \
                trends. I've been exploring different machine learning approaches, but I'm \
                curious about what others have found effective in similar contexts.\n\n\
                Specifically, I'm interested in:\n\
                - Which ML algorithms have you found most effective for time-series climate data?\n\
                - How are you handling the high dimensionality of climate datasets?\n\
                - What preprocessing techniques have yielded the best results?\n\
                - Are there any specific libraries or tools you'd recommend?\n\n\
                I've been experimenting with both traditional methods (random forests, SVMs) and \
                deep learning approaches (RNNs, LSTMs), but I'm finding that each has its own \
                challenges when applied to climate data.\n\n\
                Any insights or experiences you could share would be greatly appreciated!"
                .to_string(),
            author: author(
                "user1",
                "Alex Johnson",
                "Computer Science",
                "Member since Sep 2023",
            ),
            category: "Technology & Innovation".to_string(),
            category_slug: "technology-innovation".to_string(),
            created_at_label: "May 8, 2025".to_string(),
            view_count: 342,
            like_count: 5,
            tags: vec![
                "Machine Learning".to_string(),
                "Climate Science".to_string(),
                "Data Analysis".to_string(),
            ],
            replies: vec![
                Reply {
                    id: "reply1".to_string(),
                    author: author("user2", "Dr. Sarah Chen", "Physics", "Member since Jan 2020"),
                    content: "Great question, Alex! In my research on quantum computing \
                        applications for climate modeling, I've found that ensemble methods tend \
                        to perform particularly well for climate data.\n\n\
                        For preprocessing, I'd recommend:\n\
                        - Robust normalization techniques to handle outliers\n\
                        - Dimensionality reduction via PCA or t-SNE before feeding into your models\n\
                        - Careful handling of missing data (which is common in climate datasets)\n\n\
                        As for libraries, have you tried using xarray with scikit-learn? It's \
                        specifically designed for working with multi-dimensional arrays and \
                        labeled data, which makes it perfect for climate datasets.\n\n\
                        I'd be happy to share some of my preprocessing scripts if that would be \
                        helpful!"
                        .to_string(),
                    created_at_label: "May 8, 2025".to_string(),
                    like_count: 15,
                },
                Reply {
                    id: "reply2".to_string(),
                    author: author(
                        "user3",
                        "Carlos Rodriguez",
                        "Environmental Science",
                        "Member since Mar 2022",
                    ),
                    content: "From an environmental science perspective, I've found that the \
                        temporal aspects of climate data often require special attention. LSTMs \
                        have worked well for us, but we've had to make several adaptations:\n\n\
                        1. Incorporating multiple timescales (daily, seasonal, annual cycles)\n\
                        2. Adding attention mechanisms to help the model focus on relevant patterns\n\
                        3. Using transfer learning from pre-trained models on similar datasets\n\n\
                        One challenge we faced was dealing with the spatial components alongside \
                        temporal data. For this, we implemented a hybrid CNN-LSTM architecture \
                        that could capture both spatial patterns and temporal dependencies.\n\n\
                        Happy to discuss more specific approaches if you're interested!"
                        .to_string(),
                    created_at_label: "May 9, 2025".to_string(),
                    like_count: 8,
                },
            ],
        },
        Topic {
            id: "2".to_string(),
            title: "Seeking collaborators for sustainable architecture project".to_string(),
            content: "I'm initiating a new research project focused on sustainable architecture \
                and green building design. We're looking for collaborators from various \
                disciplines to contribute their expertise.\n\n\
                Project scope includes:\n\
                - Energy-efficient building design\n\
                - Sustainable materials research\n\
                - Urban planning integration\n\
                - Environmental impact assessment\n\n\
                If you're interested in contributing or learning more, please reply to this \
                thread!"
                .to_string(),
            author: author("user4", "Maya Patel", "Architecture", "Member since Jun 2023"),
            category: "Collaboration Opportunities".to_string(),
            category_slug: "collaboration-opportunities".to_string(),
            created_at_label: "May 7, 2025".to_string(),
            view_count: 189,
            like_count: 3,
            tags: vec![
                "Sustainability".to_string(),
                "Architecture".to_string(),
                "Urban Planning".to_string(),
            ],
            replies: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::forum::TOPICS_KEY;
    use crate::storage::MemoryStore;

    #[test]
    fn test_default_topics_shape() {
        let topics = default_topics();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].replies.len(), 2);
        assert!(topics[1].replies.is_empty());
        assert!(topics[0].content.contains("climate data"));
        assert!(!topics[1].content.to_lowercase().contains("climate"));
    }

    #[tokio::test]
    async fn test_ensure_initialized_seeds_once() {
        let store = Arc::new(MemoryStore::new());
        let repo = TopicRepository::new(store.clone());

        ensure_initialized(&repo).await;
        let first = store.snapshot(TOPICS_KEY);
        assert!(first.is_some());

        ensure_initialized(&repo).await;
        assert_eq!(store.snapshot(TOPICS_KEY), first);
        assert_eq!(repo.get_all().await, default_topics());
    }

    #[tokio::test]
    async fn test_ensure_initialized_keeps_empty_collection() {
        let store = Arc::new(MemoryStore::new());
        store.write(TOPICS_KEY, "[]").await.unwrap();
        let repo = TopicRepository::new(store.clone());

        ensure_initialized(&repo).await;

        assert_eq!(store.snapshot(TOPICS_KEY).as_deref(), Some("[]"));
        assert!(repo.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_initialized_without_storage() {
        let store = Arc::new(MemoryStore::unavailable());
        let repo = TopicRepository::new(store.clone());

        ensure_initialized(&repo).await;

        assert_eq!(store.snapshot(TOPICS_KEY), None);
    }
}
