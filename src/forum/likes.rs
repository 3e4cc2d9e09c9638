//! Like handling.
//!
//! Likes are counters that only ever grow. In [`LikeMode::Increment`] every request adds one,
//! whoever sends it. In [`LikeMode::OncePerUser`] a ledger of who liked what is kept beside
//! the topics and a repeated like from the same user is ignored.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::LIKES_KEY;
use crate::storage::KeyValueStore;

/// How like requests affect the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LikeMode {
    /// Every request increments; the user id is ignored.
    #[default]
    Increment,
    /// Each user can add at most one like per topic or reply.
    OncePerUser,
}

impl LikeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeMode::Increment => "increment",
            LikeMode::OncePerUser => "once-per-user",
        }
    }
}

impl FromStr for LikeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increment" => Ok(LikeMode::Increment),
            "once-per-user" | "once_per_user" | "toggle" => Ok(LikeMode::OncePerUser),
            other => Err(format!("Unknown like mode: {}", other)),
        }
    }
}

/// What a like was given to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LikeTarget {
    #[serde(rename_all = "camelCase")]
    Topic { topic_id: String },
    #[serde(rename_all = "camelCase")]
    Reply { topic_id: String, reply_id: String },
}

/// One recorded like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeEntry {
    #[serde(flatten)]
    pub target: LikeTarget,
    pub user_id: String,
}

/// Persisted set of (target, user) pairs.
pub struct LikeLedger<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> LikeLedger<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All recorded likes; unreadable storage reads as none.
    pub async fn entries(&self) -> Vec<LikeEntry> {
        match self.store.read(LIKES_KEY).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Stored like ledger is not decodable: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Reading like ledger failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Record a like. Returns `false` when the user already liked the target.
    pub async fn record(&self, target: LikeTarget, user_id: &str) -> bool {
        let mut entries = self.entries().await;
        if entries
            .iter()
            .any(|e| e.target == target && e.user_id == user_id)
        {
            return false;
        }

        entries.push(LikeEntry {
            target,
            user_id: user_id.to_string(),
        });

        match serde_json::to_string(&entries) {
            Ok(json) => {
                if let Err(e) = self.store.write(LIKES_KEY, &json).await {
                    tracing::warn!("Saving like ledger failed: {}", e);
                }
            }
            Err(e) => tracing::error!("Encoding like ledger failed: {}", e),
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_like_mode_parsing() {
        assert_eq!("increment".parse::<LikeMode>(), Ok(LikeMode::Increment));
        assert_eq!(
            "Once-Per-User".parse::<LikeMode>(),
            Ok(LikeMode::OncePerUser)
        );
        assert!("sometimes".parse::<LikeMode>().is_err());
        assert_eq!(LikeMode::default(), LikeMode::Increment);
    }

    #[test]
    fn test_entry_wire_format() {
        let entry = LikeEntry {
            target: LikeTarget::Reply {
                topic_id: "1".to_string(),
                reply_id: "reply1".to_string(),
            },
            user_id: "u1".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "reply");
        assert_eq!(value["topicId"], "1");
        assert_eq!(value["replyId"], "reply1");
        assert_eq!(value["userId"], "u1");

        let back: LikeEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[tokio::test]
    async fn test_record_once_per_pair() {
        let ledger = LikeLedger::new(Arc::new(MemoryStore::new()));
        let topic = || LikeTarget::Topic {
            topic_id: "1".to_string(),
        };

        assert!(ledger.record(topic(), "u1").await);
        assert!(!ledger.record(topic(), "u1").await);
        assert!(ledger.record(topic(), "u2").await);
        assert_eq!(ledger.entries().await.len(), 2);
    }
}
