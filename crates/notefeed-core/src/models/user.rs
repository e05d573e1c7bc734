//! User models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Avatar used whenever none is known.
pub const DEFAULT_AVATAR_INDEX: u32 = 1;

/// Public profile of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    /// Selects one of the canned avatar assets
    pub avatar_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl UserProfile {
    /// Create a profile without a bio
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, avatar_index: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar_index,
            bio: None,
        }
    }

    /// Attach a bio
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }
}

impl Default for UserProfile {
    /// The anonymous local viewer used until someone logs in.
    fn default() -> Self {
        Self::new("me", "Me", DEFAULT_AVATAR_INDEX).with_bio("Nothing here yet~")
    }
}

/// Legacy locally-registered account.
///
/// Only kept so data persisted under the accounts key still deserializes;
/// sign-in goes through the remote API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    pub password: String,
    pub name: String,
    pub avatar_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl fmt::Debug for Account {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("avatar_index", &self.avatar_index)
            .field("bio", &self.bio)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_local_viewer() {
        let profile = UserProfile::default();
        assert_eq!(profile.id, "me");
        assert_eq!(profile.avatar_index, DEFAULT_AVATAR_INDEX);
        assert!(profile.bio.is_some());
    }

    #[test]
    fn profile_without_bio_parses() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id":"u_1","name":"Ann","avatarIndex":2}"#).unwrap();
        assert_eq!(profile, UserProfile::new("u_1", "Ann", 2));
    }

    #[test]
    fn account_debug_redacts_password() {
        let account = Account {
            id: "u1".to_string(),
            username: "ann".to_string(),
            password: "hunter2".to_string(),
            name: "Ann".to_string(),
            avatar_index: 1,
            bio: None,
        };
        let rendered = format!("{account:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
