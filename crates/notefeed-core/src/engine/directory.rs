//! User directory derived from the post set.

use std::collections::HashMap;

use crate::models::{Post, UserProfile};

/// Known users, keyed by id, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    users: Vec<UserProfile>,
    index: HashMap<String, usize>,
}

impl Directory {
    /// Scan posts (last post per author wins), then pin the viewer's own
    /// profile so it is present even without posts.
    pub fn rebuild(posts: &[Post], current_user: &UserProfile) -> Self {
        let mut directory = Self::default();
        for post in posts {
            directory.upsert(UserProfile::new(
                &post.author_id,
                &post.author,
                post.author_avatar_index,
            ));
        }
        directory.upsert(current_user.clone());
        directory
    }

    fn upsert(&mut self, profile: UserProfile) {
        if let Some(&slot) = self.index.get(&profile.id) {
            self.users[slot] = profile;
        } else {
            self.index.insert(profile.id.clone(), self.users.len());
            self.users.push(profile);
        }
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn get(&self, user_id: &str) -> Option<&UserProfile> {
        self.index.get(user_id).map(|&slot| &self.users[slot])
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.index.contains_key(user_id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{map_post_at, PostDto};

    fn post(id: i64, author_id: &str, author: &str, avatar: u32) -> Post {
        map_post_at(
            PostDto {
                id,
                author_id: Some(author_id.to_string()),
                author_name: Some(author.to_string()),
                avatar_index: Some(avatar),
                ..PostDto::default()
            },
            0,
        )
    }

    #[test]
    fn viewer_is_present_without_posts() {
        let me = UserProfile::default();
        let directory = Directory::rebuild(&[], &me);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get("me"), Some(&me));
    }

    #[test]
    fn last_post_wins_and_authors_are_unique() {
        let posts = vec![
            post(1, "u1", "Old Name", 1),
            post(2, "u2", "Bo", 2),
            post(3, "u1", "New Name", 3),
        ];
        let directory = Directory::rebuild(&posts, &UserProfile::default());

        assert_eq!(directory.len(), 3);
        let ids: Vec<_> = directory.users().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2", "me"]);
        let u1 = directory.get("u1").unwrap();
        assert_eq!(u1.name, "New Name");
        assert_eq!(u1.avatar_index, 3);
    }

    #[test]
    fn viewer_profile_overrides_post_derived_entry() {
        let me = UserProfile::new("u_me", "Current", 2).with_bio("bio");
        let posts = vec![post(1, "u_me", "Stale", 1)];
        let directory = Directory::rebuild(&posts, &me);

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get("u_me"), Some(&me));
    }
}
