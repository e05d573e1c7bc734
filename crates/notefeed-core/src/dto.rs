//! Wire records and their mapping into domain models.
//!
//! Mapping is total: missing optional fields are defaulted, never rejected.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{cover_height_for, Post, PostId, UserProfile, DEFAULT_AVATAR_INDEX};
use crate::util::now_millis;

pub const UNTITLED: &str = "untitled";
pub const ANONYMOUS_AUTHOR: &str = "anonymous";
pub const UNKNOWN_AUTHOR_ID: &str = "unknown";

/// A post as listed by `GET /notes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: PostId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub avatar_index: Option<u32>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub cover_uri: Option<String>,
    #[serde(default)]
    pub cover_index: Option<u32>,
    #[serde(default)]
    pub cover_height: Option<u32>,
    #[serde(default)]
    pub like_count: Option<i64>,
    #[serde(default)]
    pub collect_count: Option<i64>,
    #[serde(default)]
    pub comment_count: Option<i64>,
}

/// Decode a list record by record. Records that do not fit `T` are skipped
/// and logged so one bad entry cannot sink the rest.
pub fn decode_each<T: DeserializeOwned>(records: Vec<Value>, what: &str) -> Vec<T> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value(record) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                tracing::warn!("Skipping undecodable {} at {}: {}", what, position, error);
                None
            }
        })
        .collect()
}

/// Map a wire post into the domain shape, stamping missing times with now.
pub fn map_post(dto: PostDto) -> Post {
    map_post_at(dto, now_millis())
}

/// [`map_post`] with an explicit clock.
pub fn map_post_at(dto: PostDto, now: i64) -> Post {
    let cover_height = dto.cover_height.unwrap_or_else(|| cover_height_for(dto.id));
    let cover_index = dto
        .cover_index
        .unwrap_or_else(|| Post::default_cover_index(dto.id));
    let images = dto
        .images
        .unwrap_or_else(|| dto.cover_uri.iter().cloned().collect());

    Post {
        id: dto.id,
        title: dto.title.unwrap_or_else(|| UNTITLED.to_string()),
        content: dto.content.unwrap_or_default(),
        cover_index,
        cover_uri: dto.cover_uri,
        cover_height,
        images,
        author: dto
            .author_name
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
        author_id: dto
            .author_id
            .unwrap_or_else(|| UNKNOWN_AUTHOR_ID.to_string()),
        author_avatar_index: dto.avatar_index.unwrap_or(DEFAULT_AVATAR_INDEX),
        like_count: dto.like_count.unwrap_or(0),
        // Viewer state is not carried on the wire
        liked: false,
        collected: false,
        collect_count: dto.collect_count.unwrap_or(0),
        comment_count: dto.comment_count.unwrap_or(0),
        created_at: dto.created_at.unwrap_or(now),
    }
}

/// A post read back from the local cache.
///
/// Older builds persisted fewer fields, so everything but `id` is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedPost {
    pub id: PostId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub cover_index: Option<u32>,
    #[serde(default)]
    pub cover_uri: Option<String>,
    #[serde(default)]
    pub cover_height: Option<u32>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub author_avatar_index: Option<u32>,
    #[serde(default)]
    pub like_count: Option<i64>,
    #[serde(default)]
    pub liked: Option<bool>,
    #[serde(default)]
    pub collected: Option<bool>,
    #[serde(default)]
    pub collect_count: Option<i64>,
    #[serde(default)]
    pub comment_count: Option<i64>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl CachedPost {
    /// Fill legacy gaps and produce a domain post.
    pub fn into_post(self, now: i64) -> Post {
        let author_id = self.author_id.unwrap_or_else(|| {
            format!("user{}", self.author.as_deref().unwrap_or("0"))
        });

        Post {
            id: self.id,
            title: self.title.unwrap_or_else(|| UNTITLED.to_string()),
            content: self.content.unwrap_or_default(),
            cover_index: self
                .cover_index
                .unwrap_or_else(|| Post::default_cover_index(self.id)),
            cover_uri: self.cover_uri,
            cover_height: self
                .cover_height
                .unwrap_or_else(|| cover_height_for(self.id)),
            images: self.images.unwrap_or_default(),
            author: self.author.unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
            author_id,
            author_avatar_index: self.author_avatar_index.unwrap_or(DEFAULT_AVATAR_INDEX),
            like_count: self.like_count.unwrap_or(0),
            liked: self.liked.unwrap_or(false),
            collected: self.collected.unwrap_or(false),
            collect_count: self.collect_count.unwrap_or(0),
            comment_count: self.comment_count.unwrap_or(0),
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

/// Body of `POST /register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub name: &'a str,
    pub avatar_index: u32,
}

/// Body of `POST /login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /notes`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUserDto {
    id: String,
    name: String,
    #[serde(default)]
    avatar_index: Option<u32>,
    #[serde(default)]
    bio: Option<String>,
}

/// Auth response data: either `{token?, user}` or the bare user record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AuthResponse {
    Wrapped {
        #[serde(default)]
        token: Option<String>,
        user: AuthUserDto,
    },
    Bare(AuthUserDto),
}

/// Decoded outcome of a successful register/login call
#[derive(Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub profile: UserProfile,
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthPayload {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AuthPayload")
            .field("profile", &self.profile)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AuthPayload {
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let (token, user) = match serde_json::from_value::<AuthResponse>(value)? {
            AuthResponse::Wrapped { token, user } => (token, user),
            AuthResponse::Bare(user) => (None, user),
        };
        Ok(Self {
            profile: UserProfile {
                id: user.id,
                name: user.name,
                avatar_index: user.avatar_index.unwrap_or(DEFAULT_AVATAR_INDEX),
                bio: Some(user.bio.unwrap_or_default()),
            },
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::COVER_HEIGHTS;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn decode_each_skips_only_bad_records() {
        let records = vec![
            json!({"id": 1, "title": "kept"}),
            json!({"id": 2, "avatarIndex": -3}),
            json!("not a post"),
            json!({"id": 4}),
        ];
        let dtos: Vec<PostDto> = decode_each(records, "post");
        let ids: Vec<_> = dtos.iter().map(|dto| dto.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(dtos[0].title.as_deref(), Some("kept"));
    }

    #[test]
    fn minimal_dto_gets_every_default() {
        let dto: PostDto = serde_json::from_value(json!({"id": 10})).unwrap();
        let post = map_post_at(dto, NOW);

        assert_eq!(post.title, UNTITLED);
        assert_eq!(post.content, "");
        assert_eq!(post.cover_index, 2);
        assert_eq!(post.cover_height, COVER_HEIGHTS[3]);
        assert!(post.images.is_empty());
        assert_eq!(post.author, ANONYMOUS_AUTHOR);
        assert_eq!(post.author_id, UNKNOWN_AUTHOR_ID);
        assert_eq!(post.author_avatar_index, 1);
        assert_eq!(post.like_count, 0);
        assert_eq!(post.collect_count, 0);
        assert_eq!(post.comment_count, 0);
        assert_eq!(post.created_at, NOW);
    }

    #[test]
    fn cover_defaults_follow_id_for_every_residue() {
        for id in 0..21 {
            let post = map_post_at(
                PostDto {
                    id,
                    ..PostDto::default()
                },
                NOW,
            );
            assert_eq!(post.cover_index, u32::try_from(id % 3).unwrap() + 1);
            assert_eq!(post.cover_height, COVER_HEIGHTS[usize::try_from(id % 7).unwrap()]);
        }
    }

    #[test]
    fn wire_values_win_and_viewer_flags_reset() {
        let dto: PostDto = serde_json::from_value(json!({
            "id": 4,
            "title": "Library check-in",
            "content": "quiet today",
            "createdAt": 42,
            "authorId": "u_abc",
            "authorName": "Ann",
            "avatarIndex": 3,
            "coverIndex": 2,
            "coverHeight": 333,
            "likeCount": 9,
            "collectCount": 8,
            "commentCount": 7,
            "liked": true
        }))
        .unwrap();
        let post = map_post_at(dto, NOW);

        assert_eq!(post.title, "Library check-in");
        assert_eq!(post.author_id, "u_abc");
        assert_eq!(post.author, "Ann");
        assert_eq!(post.author_avatar_index, 3);
        assert_eq!(post.cover_index, 2);
        assert_eq!(post.cover_height, 333);
        assert_eq!(post.like_count, 9);
        assert_eq!(post.created_at, 42);
        assert!(!post.liked);
        assert!(!post.collected);
    }

    #[test]
    fn cover_uri_becomes_single_image() {
        let post = map_post_at(
            PostDto {
                id: 1,
                cover_uri: Some("file://cover.jpg".to_string()),
                ..PostDto::default()
            },
            NOW,
        );
        assert_eq!(post.images, vec!["file://cover.jpg".to_string()]);

        let post = map_post_at(
            PostDto {
                id: 1,
                cover_uri: Some("file://cover.jpg".to_string()),
                images: Some(vec!["a".to_string(), "b".to_string()]),
                ..PostDto::default()
            },
            NOW,
        );
        assert_eq!(post.images, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn legacy_cached_post_is_normalized() {
        let cached: CachedPost = serde_json::from_value(json!({
            "id": 3,
            "title": "Night run log",
            "content": "5k",
            "coverIndex": 1,
            "coverHeight": 180,
            "author": "Bo",
            "likeCount": 4,
            "liked": true,
            "createdAt": 99
        }))
        .unwrap();
        let post = cached.into_post(NOW);

        assert_eq!(post.author_id, "userBo");
        assert_eq!(post.author_avatar_index, 1);
        assert!(post.images.is_empty());
        assert!(!post.collected);
        assert_eq!(post.collect_count, 0);
        assert_eq!(post.comment_count, 0);
        assert!(post.liked);
        assert_eq!(post.like_count, 4);
        assert_eq!(post.created_at, 99);
    }

    #[test]
    fn cached_post_without_author_uses_user_zero() {
        let post = CachedPost {
            id: 1,
            ..CachedPost::default()
        }
        .into_post(NOW);
        assert_eq!(post.author_id, "user0");
    }

    #[test]
    fn cached_post_roundtrips_current_shape() {
        let original = map_post_at(
            PostDto {
                id: 12,
                author_id: Some("u2".to_string()),
                ..PostDto::default()
            },
            NOW,
        );
        let cached: CachedPost =
            serde_json::from_value(serde_json::to_value(&original).unwrap()).unwrap();
        assert_eq!(cached.into_post(0), original);
    }

    #[test]
    fn auth_payload_accepts_wrapped_user_with_token() {
        let payload = AuthPayload::from_value(json!({
            "token": "t0k",
            "user": {"id": "u_1", "username": "ann", "name": "Ann", "avatarIndex": 2}
        }))
        .unwrap();
        assert_eq!(payload.token.as_deref(), Some("t0k"));
        assert_eq!(payload.profile, UserProfile::new("u_1", "Ann", 2).with_bio(""));
        assert!(!format!("{payload:?}").contains("t0k"));
    }

    #[test]
    fn auth_payload_accepts_bare_user() {
        let payload = AuthPayload::from_value(json!({
            "id": "u_2", "name": "Bo", "avatarIndex": 3, "bio": "hi"
        }))
        .unwrap();
        assert_eq!(payload.token, None);
        assert_eq!(payload.profile.bio.as_deref(), Some("hi"));
    }

    #[test]
    fn auth_payload_rejects_missing_user() {
        assert!(AuthPayload::from_value(json!({"token": "x"})).is_err());
        assert!(AuthPayload::from_value(serde_json::Value::Null).is_err());
    }
}
