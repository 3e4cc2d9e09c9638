//! Read-only views derived from the topic collection.
//!
//! Everything here takes topics by reference and returns fresh values; nothing writes back.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Deserialize;

use super::dates::parse_created_at;
use crate::models::{CategorySummary, TagSummary, Topic, CATEGORIES, SUGGESTED_TAGS};

/// Topic list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest creation date first.
    #[default]
    Recent,
    /// Most likes plus replies first.
    Popular,
}

/// Filter by free-text query and order the result.
///
/// The query matches case-insensitively as a substring of the title, the content or any tag.
/// A blank query keeps everything; otherwise surrounding whitespace is part of the match.
/// Ties keep their stored order. Creation labels that cannot be parsed sort as oldest.
pub fn list_topics(topics: &[Topic], sort: SortOrder, query: Option<&str>) -> Vec<Topic> {
    let needle = query
        .filter(|q| !q.trim().is_empty())
        .map(str::to_lowercase);

    let mut listed: Vec<Topic> = topics
        .iter()
        .filter(|topic| needle.as_deref().map_or(true, |q| matches_query(topic, q)))
        .cloned()
        .collect();

    match sort {
        SortOrder::Popular => listed.sort_by_key(|t| Reverse(t.popularity())),
        SortOrder::Recent => {
            listed.sort_by_cached_key(|t| Reverse(parse_created_at(&t.created_at_label)))
        }
    }

    listed
}

fn matches_query(topic: &Topic, needle: &str) -> bool {
    topic.title.to_lowercase().contains(needle)
        || topic.content.to_lowercase().contains(needle)
        || topic.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Keep only topics filed under the given category slug.
pub fn filter_by_category(topics: Vec<Topic>, slug: &str) -> Vec<Topic> {
    topics
        .into_iter()
        .filter(|t| t.category_slug == slug)
        .collect()
}

/// The category catalog with live counts.
pub fn category_summaries(topics: &[Topic]) -> Vec<CategorySummary> {
    CATEGORIES
        .iter()
        .map(|category| {
            let filed: Vec<&Topic> = topics
                .iter()
                .filter(|t| t.category_slug == category.slug)
                .collect();

            CategorySummary {
                id: category.slug.to_string(),
                title: category.title.to_string(),
                description: category.description.to_string(),
                topic_count: filed.len(),
                post_count: filed.iter().map(|t| 1 + t.replies.len()).sum(),
            }
        })
        .collect()
}

/// Suggested tags merged with the tags in use, most used first.
pub fn tag_summaries(topics: &[Topic]) -> Vec<TagSummary> {
    let mut counts: BTreeMap<&str, usize> = SUGGESTED_TAGS.iter().map(|tag| (*tag, 0)).collect();

    for topic in topics {
        for tag in &topic.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut summaries: Vec<TagSummary> = counts
        .into_iter()
        .map(|(name, topic_count)| TagSummary {
            name: name.to_string(),
            topic_count,
            suggested: SUGGESTED_TAGS.contains(&name),
        })
        .collect();

    // BTreeMap already yields names in order, so a stable sort by count keeps that tiebreak.
    summaries.sort_by_key(|s| Reverse(s.topic_count));
    summaries
}
