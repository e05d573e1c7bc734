//! Post model

use serde::{Deserialize, Serialize};

/// Identifier of a post. Local inserts use `max(existing) + 1`.
pub type PostId = i64;

/// Masonry cover heights, picked by `id mod 7` when the wire omits one.
pub const COVER_HEIGHTS: [u32; 7] = [140, 160, 180, 200, 220, 240, 260];

/// Number of canned cover assets cycled through by `cover_index`.
const COVER_ASSET_COUNT: i64 = 3;

/// A post in the feed
///
/// Serialized as camelCase JSON so the persisted cache stays readable by
/// older builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Canned cover asset (1-based), used when `cover_uri` is absent
    pub cover_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_uri: Option<String>,
    /// Cover height for the masonry layout
    pub cover_height: u32,
    /// Attached images; the first one doubles as cover
    pub images: Vec<String>,
    /// Author display name
    pub author: String,
    /// Author user id (not enforced as a foreign key)
    pub author_id: String,
    pub author_avatar_index: u32,
    pub like_count: i64,
    /// Viewer-scoped like flag
    pub liked: bool,
    /// Viewer-scoped collect flag
    pub collected: bool,
    pub collect_count: i64,
    pub comment_count: i64,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Post {
    /// Default cover asset for a post id: `(id mod 3) + 1`.
    #[must_use]
    pub fn default_cover_index(id: PostId) -> u32 {
        // rem_euclid keeps the result in 0..3 even for negative ids
        u32::try_from(id.rem_euclid(COVER_ASSET_COUNT)).unwrap_or(0) + 1
    }

    /// Flip the like flag and move the counter with it.
    pub fn toggle_like(&mut self) {
        self.liked = !self.liked;
        self.like_count += if self.liked { 1 } else { -1 };
    }

    /// Flip the collect flag and move the counter with it.
    pub fn toggle_collect(&mut self) {
        self.collected = !self.collected;
        self.collect_count += if self.collected { 1 } else { -1 };
    }
}

/// Default cover height for a post id: `COVER_HEIGHTS[id mod 7]`.
#[must_use]
pub fn cover_height_for(id: PostId) -> u32 {
    let len = i64::try_from(COVER_HEIGHTS.len()).unwrap_or(i64::MAX);
    let slot = usize::try_from(id.rem_euclid(len)).unwrap_or(0);
    COVER_HEIGHTS[slot]
}
