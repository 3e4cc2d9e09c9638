//! Tantivy-based search index module.
//!
//! Provides ranked full-text search over forum topics with field boosting. Reply text is
//! indexed with the topic that owns it.

use std::path::Path;
use std::sync::Arc;
use tantivy::collector::{Count, TopDocs};
use tantivy::query::{BooleanQuery, BoostQuery, Occur, QueryParser};
use tantivy::schema::{Field, Schema, Value, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::Topic;

/// Field boost values.
const BOOST_TITLE: f32 = 10.0;
const BOOST_TAGS: f32 = 8.0;
const BOOST_CONTENT: f32 = 6.0;
const BOOST_CATEGORY: f32 = 4.0;
const BOOST_REPLIES: f32 = 2.5;

/// Search result with topic and relevance score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub topic_id: String,
    pub score: f32,
}

/// One page of hits plus the number of topics matching overall.
#[derive(Debug, Clone, Default)]
pub struct SearchHits {
    pub results: Vec<SearchResult>,
    pub total: usize,
}

/// Search index schema fields.
struct SearchFields {
    topic_id: Field,
    title: Field,
    content: Field,
    tags: Field,
    category: Field,
    replies: Field,
}

/// Tantivy search index for forum topics.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    writer: Arc<RwLock<IndexWriter>>,
    fields: SearchFields,
}

impl SearchIndex {
    /// Create or open a search index at the specified path.
    pub fn open(index_path: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(index_path)
            .map_err(|e| AppError::Search(format!("Failed to create index directory: {}", e)))?;

        let mut schema_builder = Schema::builder();
        let topic_id = schema_builder.add_text_field("topic_id", STRING | STORED);
        let title = schema_builder.add_text_field("title", TEXT | STORED);
        let content = schema_builder.add_text_field("content", TEXT);
        let tags = schema_builder.add_text_field("tags", TEXT);
        let category = schema_builder.add_text_field("category", TEXT);
        let replies = schema_builder.add_text_field("replies", TEXT);
        let schema = schema_builder.build();

        let fields = SearchFields {
            topic_id,
            title,
            content,
            tags,
            category,
            replies,
        };

        // Try to open existing index or create new one
        let index = Index::open_in_dir(index_path)
            .or_else(|_| Index::create_in_dir(index_path, schema.clone()))
            .map_err(|e| AppError::Search(format!("Failed to open/create index: {}", e)))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| AppError::Search(format!("Failed to create reader: {}", e)))?;

        let writer = index
            .writer(50_000_000) // 50MB buffer
            .map_err(|e| AppError::Search(format!("Failed to create writer: {}", e)))?;

        Ok(Self {
            index,
            reader,
            writer: Arc::new(RwLock::new(writer)),
            fields,
        })
    }

    /// Rebuild the entire index from topics.
    pub async fn rebuild(&self, topics: &[Topic]) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_all_documents()?;
        for topic in topics {
            writer.add_document(self.create_document(topic))?;
        }
        writer.commit()?;

        self.reader.reload()?;

        tracing::info!("Search index rebuilt with {} topics", topics.len());
        Ok(())
    }

    /// Index a single topic, replacing any earlier version of it.
    pub async fn index_topic(&self, topic: &Topic) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        let term = tantivy::Term::from_field_text(self.fields.topic_id, &topic.id);
        writer.delete_term(term);

        writer.add_document(self.create_document(topic))?;
        writer.commit()?;

        self.reader.reload()?;

        Ok(())
    }

    /// Search for topics matching the query.
    pub fn search(
        &self,
        query_str: &str,
        limit: usize,
        offset: usize,
    ) -> Result<SearchHits, AppError> {
        if query_str.trim().is_empty() {
            return Ok(SearchHits::default());
        }

        let searcher = self.reader.searcher();

        let query_parser = QueryParser::for_index(
            &self.index,
            vec![
                self.fields.title,
                self.fields.content,
                self.fields.tags,
                self.fields.category,
                self.fields.replies,
            ],
        );

        let base_query = query_parser
            .parse_query(query_str)
            .map_err(|e| AppError::BadRequest(format!("Invalid search query: {}", e)))?;

        let mut subqueries: Vec<(Occur, Box<dyn tantivy::query::Query>)> = Vec::new();

        let field_queries = [
            (self.fields.title, BOOST_TITLE),
            (self.fields.tags, BOOST_TAGS),
            (self.fields.content, BOOST_CONTENT),
            (self.fields.category, BOOST_CATEGORY),
            (self.fields.replies, BOOST_REPLIES),
        ];

        for (field, boost) in field_queries {
            let field_parser = QueryParser::for_index(&self.index, vec![field]);
            if let Ok(field_query) = field_parser.parse_query(query_str) {
                let boosted = BoostQuery::new(field_query, boost);
                subqueries.push((Occur::Should, Box::new(boosted)));
            }
        }

        let combined_query = if subqueries.is_empty() {
            base_query
        } else {
            Box::new(BooleanQuery::new(subqueries))
        };

        // TopDocs panics on a zero limit.
        let collector = (TopDocs::with_limit((limit + offset).max(1)), Count);
        let (top_docs, total) = searcher
            .search(&combined_query, &collector)
            .map_err(|e| AppError::Search(format!("Search failed: {}", e)))?;

        let results: Vec<SearchResult> = top_docs
            .into_iter()
            .skip(offset)
            .take(limit)
            .filter_map(|(score, doc_address)| {
                let doc: TantivyDocument = searcher.doc(doc_address).ok()?;
                let topic_id = doc.get_first(self.fields.topic_id)?.as_str()?.to_string();
                Some(SearchResult { topic_id, score })
            })
            .collect();

        Ok(SearchHits { results, total })
    }

    fn create_document(&self, topic: &Topic) -> TantivyDocument {
        let replies = topic
            .replies
            .iter()
            .map(|r| r.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        doc!(
            self.fields.topic_id => topic.id.clone(),
            self.fields.title => topic.title.clone(),
            self.fields.content => topic.content.clone(),
            self.fields.tags => topic.tags.join(" "),
            self.fields.category => topic.category.clone(),
            self.fields.replies => replies
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forum::{ForumStore, LikeMode};
    use crate::models::{Author, Reply};
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    fn create_test_topic(id: &str, title: &str, content: &str) -> Topic {
        Topic {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            author: Author::default(),
            category: "General Discussion".to_string(),
            category_slug: "general-discussion".to_string(),
            created_at_label: "May 1, 2025".to_string(),
            view_count: 1,
            like_count: 0,
            tags: vec!["Grants".to_string()],
            replies: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_search_index_creation() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        let topics = vec![
            create_test_topic("1", "Telescope time allocation", "How are hours split?"),
            create_test_topic("2", "Lab safety training", "Annual refresher dates"),
        ];

        index.rebuild(&topics).await.unwrap();

        let results = index.search("telescope", 10, 0).unwrap().results;
        assert!(!results.is_empty());
        assert_eq!(results[0].topic_id, "1");
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        let results = index.search("", 10, 0).unwrap().results;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_reindex_replaces_topic() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        let mut topic = create_test_topic("1", "Telescope time allocation", "Hours?");
        index.rebuild(std::slice::from_ref(&topic)).await.unwrap();
        assert!(index.search("spectrograph", 10, 0).unwrap().results.is_empty());

        topic.replies.push(Reply {
            id: "r1".to_string(),
            author: Author::default(),
            content: "Ask the spectrograph group first".to_string(),
            created_at_label: "May 2, 2025".to_string(),
            like_count: 0,
        });
        index.index_topic(&topic).await.unwrap();

        let results = index.search("spectrograph", 10, 0).unwrap().results;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].topic_id, "1");
        assert_eq!(index.search("telescope", 10, 0).unwrap().results.len(), 1);
    }

    #[tokio::test]
    async fn test_search_seeded_forum() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        let forum = ForumStore::new(Arc::new(MemoryStore::new()), LikeMode::Increment);
        forum.ensure_initialized().await;
        index.rebuild(&forum.get_all().await).await.unwrap();

        let results = index.search("architecture", 10, 0).unwrap().results;
        assert_eq!(results[0].topic_id, "2");
    }

    #[tokio::test]
    async fn test_total_counts_beyond_page() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        let topics: Vec<Topic> = (1..=5)
            .map(|i| create_test_topic(&i.to_string(), "Grant writing workshop", "Notes"))
            .collect();
        index.rebuild(&topics).await.unwrap();

        let hits = index.search("grant", 2, 1).unwrap();
        assert_eq!(hits.results.len(), 2);
        assert_eq!(hits.total, 5);

        let hits = index.search("grant", 0, 0).unwrap();
        assert!(hits.results.is_empty());
        assert_eq!(hits.total, 5);
    }
}
