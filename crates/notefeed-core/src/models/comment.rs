//! Comment model

use serde::{Deserialize, Serialize};

use super::PostId;

/// A local-only comment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    /// Post this comment belongs to; may dangle
    pub note_id: PostId,
    pub author: String,
    pub content: String,
    pub like_count: i64,
    pub liked: bool,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<Comment>>,
}

impl Comment {
    /// Create a new top-level comment
    #[must_use]
    pub fn new(
        id: i64,
        note_id: PostId,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            note_id,
            author: author.into(),
            content: content.into(),
            like_count: 0,
            liked: false,
            created_at: chrono::Utc::now().timestamp_millis(),
            replies: None,
        }
    }
}
