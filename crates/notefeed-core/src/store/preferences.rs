//! Typed access to the persisted feed collections.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{LocalStore, StoreError, StoreKey, StoreResult};
use crate::dto::{decode_each, CachedPost};
use crate::models::{Comment, Post, UserProfile};

/// Typed wrapper over a [`LocalStore`].
///
/// Absent collections read as empty and absent records as `None`. Errors
/// are returned, never logged here; the caller decides.
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
}

impl<S: LocalStore> Preferences<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn inner(&self) -> &S {
        &self.store
    }

    /// Cached posts in their possibly-legacy shape. Individual records that
    /// no longer decode are dropped; a value that is not a list, or a list
    /// where nothing decodes, is an error.
    pub async fn load_posts(&self) -> StoreResult<Vec<CachedPost>> {
        let records = self.load_collection::<Value>(StoreKey::Notes).await?;
        let stored = records.len();
        let posts = decode_each(records, "cached post");
        if posts.is_empty() && stored > 0 {
            return Err(StoreError::Corrupt(format!(
                "none of {stored} cached posts decode"
            )));
        }
        Ok(posts)
    }

    pub async fn save_posts(&self, posts: &[Post]) -> StoreResult<()> {
        self.save(StoreKey::Notes, posts).await
    }

    pub async fn load_profile(&self) -> StoreResult<Option<UserProfile>> {
        self.load_record(StoreKey::UserProfile).await
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.save(StoreKey::UserProfile, profile).await
    }

    pub async fn clear_profile(&self) -> StoreResult<()> {
        self.store.delete(StoreKey::UserProfile).await
    }

    pub async fn load_followings(&self) -> StoreResult<Vec<String>> {
        self.load_collection(StoreKey::Followings).await
    }

    pub async fn save_followings(&self, user_ids: &[String]) -> StoreResult<()> {
        self.save(StoreKey::Followings, user_ids).await
    }

    pub async fn load_comments(&self) -> StoreResult<Vec<Comment>> {
        self.load_collection(StoreKey::Comments).await
    }

    pub async fn save_comments(&self, comments: &[Comment]) -> StoreResult<()> {
        self.save(StoreKey::Comments, comments).await
    }

    pub async fn clear_all(&self) -> StoreResult<()> {
        self.store.clear().await
    }

    async fn load_collection<T: DeserializeOwned>(&self, key: StoreKey) -> StoreResult<Vec<T>> {
        Ok(self.load_record(key).await?.unwrap_or_default())
    }

    async fn load_record<T: DeserializeOwned>(&self, key: StoreKey) -> StoreResult<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        // A persisted `null` reads as absent
        Ok(serde_json::from_str::<Option<T>>(&raw)?)
    }

    async fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> StoreResult<()> {
        let serialized = serde_json::to_string(value)?;
        self.store.put(key, &serialized).await
    }
}
