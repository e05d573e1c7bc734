//! Session state and the remote → cache → seed synchronization engine.
//!
//! [`SyncEngine`] owns every mutable collection of the session. All
//! operations take `&mut self`, so in-memory transitions can never interleave;
//! share an engine behind a `tokio::sync::Mutex` when several callers need it.

mod directory;
mod mutations;
pub mod seed;


use serde::Deserialize;
use serde_json::Value;

use crate::dto::{decode_each, map_post_at, PostDto};
use crate::models::{Comment, Post, PostId, UserProfile};
use crate::remote::{ApiResult, RemoteClient};
use crate::store::{LocalStore, Preferences, StoreResult};
use crate::util::now_millis;

pub use directory::Directory;
pub use mutations::{AuthOutcome, PublishOutcome};

const NOTES_PATH: &str = "/notes";

/// Lifecycle of an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initializing,
    Ready,
}

/// Which tier of the fallback chain produced the current post set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshSource {
    Remote,
    Cache,
    Seed,
}

pub struct SyncEngine<R, S> {
    remote: R,
    prefs: Preferences<S>,
    state: EngineState,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    directory: Directory,
    followed_user_ids: Vec<String>,
    current_user: UserProfile,
    logged_in: bool,
}

impl<R: RemoteClient, S: LocalStore> SyncEngine<R, S> {
    pub fn new(remote: R, store: S) -> Self {
        let current_user = UserProfile::default();
        Self {
            remote,
            prefs: Preferences::new(store),
            state: EngineState::Uninitialized,
            posts: Vec::new(),
            comments: Vec::new(),
            directory: Directory::rebuild(&[], &current_user),
            followed_user_ids: Vec::new(),
            current_user,
            logged_in: false,
        }
    }

    /// Restore the session, load posts, and load comments. A second call on
    /// a ready engine does nothing.
    pub async fn initialize(&mut self) {
        if self.state != EngineState::Uninitialized {
            return;
        }
        self.state = EngineState::Initializing;

        match self.prefs.load_profile().await {
            Ok(Some(profile)) => {
                tracing::info!("Restored session for user {}", profile.id);
                self.current_user = profile;
                self.logged_in = true;
            }
            Ok(None) => self.logged_in = false,
            Err(error) => {
                tracing::warn!("Failed to load persisted profile: {}", error);
                self.logged_in = false;
            }
        }

        self.followed_user_ids = self
            .prefs
            .load_followings()
            .await
            .unwrap_or_else(|error| {
                tracing::warn!("Failed to load followings: {}", error);
                Vec::new()
            });

        self.refresh().await;

        match self.prefs.load_comments().await {
            Ok(comments) if !comments.is_empty() => self.comments = comments,
            Ok(_) => {}
            Err(error) => tracing::warn!("Failed to load comments: {}", error),
        }

        self.state = EngineState::Ready;
    }

    /// Replace the post set from the first tier that yields one: remote,
    /// then the persisted cache, then generated seed data.
    pub async fn refresh(&mut self) -> RefreshSource {
        let error = match self.fetch_remote_posts().await {
            Ok(posts) => {
                tracing::info!("Loaded {} posts from remote", posts.len());
                self.posts = posts;
                self.rebuild_directory();
                self.persist_posts().await;
                return RefreshSource::Remote;
            }
            Err(error) => error,
        };
        tracing::warn!("Remote fetch failed, falling back to cache: {}", error);

        let cache_readable = match self.load_cached_posts().await {
            Ok(cached) if !cached.is_empty() => {
                tracing::info!("Loaded {} posts from local cache", cached.len());
                self.posts = cached;
                self.rebuild_directory();
                return RefreshSource::Cache;
            }
            Ok(_) => true,
            Err(error) => {
                tracing::warn!("Failed to read cached posts: {}", error);
                false
            }
        };

        tracing::info!("No cached posts, generating seed data");
        let seed = seed::generate(now_millis());
        self.posts = seed.posts;
        self.followed_user_ids = seed.followed_user_ids;
        // An unreadable cache is left in place rather than overwritten
        if cache_readable {
            self.persist_posts().await;
            self.persist_followings().await;
        }
        self.rebuild_directory();
        RefreshSource::Seed
    }

    async fn fetch_remote_posts(&self) -> ApiResult<Vec<Post>> {
        let data = self.remote.get(NOTES_PATH).await?;
        let dtos: Vec<PostDto> = decode_each(Vec::<Value>::deserialize(data)?, "remote post");
        let now = now_millis();
        Ok(dtos.into_iter().map(|dto| map_post_at(dto, now)).collect())
    }

    async fn load_cached_posts(&self) -> StoreResult<Vec<Post>> {
        let cached = self.prefs.load_posts().await?;
        let now = now_millis();
        Ok(cached.into_iter().map(|post| post.into_post(now)).collect())
    }

    fn rebuild_directory(&mut self) {
        self.directory = Directory::rebuild(&self.posts, &self.current_user);
    }

    fn next_post_id(&self) -> PostId {
        self.posts.iter().map(|post| post.id).max().map_or(1, |max| max + 1)
    }

    fn post_mut(&mut self, post_id: PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|post| post.id == post_id)
    }

    async fn persist_posts(&self) {
        log_store_failure("posts", self.prefs.save_posts(&self.posts).await);
    }

    async fn persist_comments(&self) {
        log_store_failure("comments", self.prefs.save_comments(&self.comments).await);
    }

    async fn persist_followings(&self) {
        log_store_failure(
            "followings",
            self.prefs.save_followings(&self.followed_user_ids).await,
        );
    }

    async fn persist_profile(&self) {
        log_store_failure("profile", self.prefs.save_profile(&self.current_user).await);
    }

    pub const fn state(&self) -> EngineState {
        self.state
    }

    pub const fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub const fn current_user(&self) -> &UserProfile {
        &self.current_user
    }

    /// Full post set, in feed order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, post_id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    /// Users derived from the post set plus the viewer
    pub fn users(&self) -> &[UserProfile] {
        self.directory.users()
    }

    pub const fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn followed_user_ids(&self) -> &[String] {
        &self.followed_user_ids
    }

    pub fn is_following(&self, user_id: &str) -> bool {
        self.followed_user_ids.iter().any(|id| id == user_id)
    }

    pub fn followed_users(&self) -> Vec<UserProfile> {
        self.directory
            .users()
            .iter()
            .filter(|user| self.is_following(&user.id))
            .cloned()
            .collect()
    }

    pub fn followed_posts(&self) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|post| self.is_following(&post.author_id))
            .cloned()
            .collect()
    }

    pub fn recommended_posts(&self) -> Vec<Post> {
        self.posts.clone()
    }

    pub fn my_posts(&self) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|post| post.author_id == self.current_user.id)
            .cloned()
            .collect()
    }

    pub fn comments_for(&self, post_id: PostId) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|comment| comment.note_id == post_id)
            .cloned()
            .collect()
    }
}

/// Persistence failures are logged here and never returned to callers.
fn log_store_failure(what: &str, result: StoreResult<()>) {
    if let Err(error) = result {
        tracing::warn!("Failed to persist {}: {}", what, error);
    }
}
