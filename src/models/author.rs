//! Author model embedded in topics and replies.

use serde::{Deserialize, Serialize};

/// The author of a topic or reply.
///
/// Each topic and reply carries its own copy; authors are never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "name")]
    pub display_name: String,
    #[serde(default, rename = "avatar")]
    pub avatar_ref: String,
    #[serde(default, rename = "department")]
    pub affiliation: String,
    #[serde(default, rename = "joinDate")]
    pub join_label: String,
}

/// Placeholder avatar used when the caller supplies none.
pub const DEFAULT_AVATAR: &str = "/placeholder.svg?height=40&width=40";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_wire_names() {
        let author = Author {
            id: "user1".to_string(),
            display_name: "Alex Johnson".to_string(),
            avatar_ref: DEFAULT_AVATAR.to_string(),
            affiliation: "Computer Science".to_string(),
            join_label: "Member since Sep 2023".to_string(),
        };
        let value = serde_json::to_value(&author).unwrap();

        assert_eq!(value["name"], "Alex Johnson");
        assert_eq!(value["department"], "Computer Science");
        assert_eq!(value["joinDate"], "Member since Sep 2023");
        assert_eq!(value["avatar"], DEFAULT_AVATAR);
    }

    #[test]
    fn test_author_missing_fields() {
        let author: Author = serde_json::from_str(r#"{"id":"u9"}"#).unwrap();
        assert_eq!(author.id, "u9");
        assert!(author.display_name.is_empty());
    }
}
