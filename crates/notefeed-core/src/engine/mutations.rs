//! Session and content mutations.

use serde::Serialize;

use super::{SyncEngine, NOTES_PATH};
use crate::dto::{AuthPayload, LoginRequest, PublishRequest, RegisterRequest, UNTITLED};
use crate::models::{Comment, Post, PostId, UserProfile};
use crate::remote::{ApiResult, RemoteClient};
use crate::store::LocalStore;
use crate::util::now_millis;

const REGISTER_PATH: &str = "/register";
const LOGIN_PATH: &str = "/login";

const MISSING_REGISTRATION_FIELDS: &str = "Please fill in all fields";
const MISSING_CREDENTIALS: &str = "Please enter username and password";

/// Result of a register or login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn(UserProfile),
    Failed(String),
}

impl AuthOutcome {
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    /// Failure message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::SignedIn(_) => None,
            Self::Failed(message) => Some(message.as_str()),
        }
    }
}

/// Where a published post ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Accepted by the backend; the feed was refreshed
    Remote,
    /// Backend unreachable; inserted locally under this id
    Local(PostId),
}

impl<R: RemoteClient, S: LocalStore> SyncEngine<R, S> {
    pub async fn register(
        &mut self,
        username: &str,
        password: &str,
        name: &str,
        avatar_index: u32,
    ) -> AuthOutcome {
        if [username, password, name]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return AuthOutcome::Failed(MISSING_REGISTRATION_FIELDS.to_string());
        }

        let request = RegisterRequest {
            username,
            password,
            name,
            avatar_index,
        };
        self.authenticate(REGISTER_PATH, &request).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> AuthOutcome {
        if username.trim().is_empty() || password.trim().is_empty() {
            return AuthOutcome::Failed(MISSING_CREDENTIALS.to_string());
        }

        let request = LoginRequest { username, password };
        self.authenticate(LOGIN_PATH, &request).await
    }

    pub async fn logout(&mut self) {
        self.logged_in = false;
        self.remote.set_token(None).await;
        if let Err(error) = self.prefs.clear_profile().await {
            tracing::warn!("Failed to clear persisted profile: {}", error);
        }
        tracing::info!("Logged out {}", self.current_user.id);
    }

    async fn authenticate<B: Serialize>(&mut self, path: &str, body: &B) -> AuthOutcome {
        let payload = match self.request_auth(path, body).await {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!("Auth request to {} failed: {}", path, error);
                return AuthOutcome::Failed(error.to_string());
            }
        };

        self.remote.set_token(payload.token).await;
        self.current_user = payload.profile;
        self.logged_in = true;
        tracing::info!("Signed in as {}", self.current_user.id);

        self.persist_profile().await;
        self.rebuild_directory();
        self.refresh().await;
        AuthOutcome::SignedIn(self.current_user.clone())
    }

    async fn request_auth<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<AuthPayload> {
        let body = serde_json::to_value(body)?;
        let data = self.remote.post(path, body).await?;
        Ok(AuthPayload::from_value(data)?)
    }

    /// Publish a post. Never fails visibly: when the backend rejects or
    /// cannot be reached, the post is inserted locally at the head of the feed.
    pub async fn publish_note(
        &mut self,
        title: &str,
        content: &str,
        images: Vec<String>,
        cover_height: u32,
    ) -> PublishOutcome {
        let title = if title.trim().is_empty() { UNTITLED } else { title };
        let request = PublishRequest {
            title,
            content,
            author_id: &self.current_user.id,
        };

        let result = match serde_json::to_value(&request) {
            Ok(body) => self.remote.post(NOTES_PATH, body).await,
            Err(error) => Err(error.into()),
        };
        match result {
            Ok(_) => {
                self.refresh().await;
                PublishOutcome::Remote
            }
            Err(error) => {
                tracing::warn!("Publish failed, inserting locally: {}", error);
                let post = Post {
                    id: self.next_post_id(),
                    title: title.to_string(),
                    content: content.to_string(),
                    cover_index: 1,
                    cover_uri: images.first().cloned(),
                    cover_height,
                    images,
                    author: self.current_user.name.clone(),
                    author_id: self.current_user.id.clone(),
                    author_avatar_index: self.current_user.avatar_index,
                    like_count: 0,
                    liked: false,
                    collected: false,
                    collect_count: 0,
                    comment_count: 0,
                    created_at: now_millis(),
                };
                let id = post.id;
                self.posts.insert(0, post);
                self.persist_posts().await;
                self.rebuild_directory();
                PublishOutcome::Local(id)
            }
        }
    }

    pub async fn toggle_like(&mut self, post_id: PostId) {
        let Some(post) = self.post_mut(post_id) else {
            tracing::debug!("toggle_like: no post {}", post_id);
            return;
        };
        post.toggle_like();
        self.persist_posts().await;
    }

    pub async fn toggle_collect(&mut self, post_id: PostId) {
        let Some(post) = self.post_mut(post_id) else {
            tracing::debug!("toggle_collect: no post {}", post_id);
            return;
        };
        post.toggle_collect();
        self.persist_posts().await;
    }

    pub async fn toggle_follow(&mut self, user_id: &str) {
        if user_id == self.current_user.id {
            return;
        }

        if self.is_following(user_id) {
            self.followed_user_ids.retain(|id| id != user_id);
        } else {
            self.followed_user_ids.push(user_id.to_string());
        }
        self.persist_followings().await;
    }

    /// Record a comment, authored by the current user unless `author` is
    /// given. The target post need not exist.
    pub async fn add_comment(
        &mut self,
        post_id: PostId,
        content: &str,
        author: Option<&str>,
    ) -> Comment {
        let id = self
            .comments
            .iter()
            .map(|comment| comment.id)
            .max()
            .map_or(1, |max| max + 1);
        let author = author.unwrap_or(&self.current_user.name).to_string();
        let comment = Comment::new(id, post_id, author, content);
        self.comments.push(comment.clone());

        if let Some(post) = self.post_mut(post_id) {
            post.comment_count += 1;
            self.persist_posts().await;
        }
        self.persist_comments().await;
        comment
    }

    /// Replace the viewer's profile and restamp their posts.
    pub async fn update_profile(&mut self, name: &str, bio: &str, avatar_index: u32) {
        self.current_user.name = name.to_string();
        self.current_user.bio = Some(bio.to_string());
        self.current_user.avatar_index = avatar_index;

        let user_id = self.current_user.id.clone();
        for post in self.posts.iter_mut().filter(|post| post.author_id == user_id) {
            post.author = name.to_string();
            post.author_avatar_index = avatar_index;
        }

        self.persist_profile().await;
        self.persist_posts().await;
        self.rebuild_directory();
    }

    /// Wipe everything persisted. In-memory state is left as is.
    pub async fn clear_local_data(&mut self) {
        if let Err(error) = self.prefs.clear_all().await {
            tracing::warn!("Failed to clear local data: {}", error);
        }
    }
}
