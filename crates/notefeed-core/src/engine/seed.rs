//! Deterministic demo data for a first run with no backend and no cache.

use crate::models::{cover_height_for, Post, PostId, UserProfile};

pub const SEED_POST_COUNT: PostId = 36;

/// Users the seeded session starts out following.
pub const SEED_FOLLOWED_IDS: [&str; 2] = ["u1", "u2"];

const HOUR_MS: i64 = 3600 * 1000;

const SEED_TITLES: [&str; 12] = [
    "Campus snapshots",
    "Exam prep diary",
    "Circuit lab notes",
    "Library check-in",
    "Night run log",
    "Desk setup share",
    "Cafeteria review",
    "Weekend trip",
    "Course notes roundup",
    "Interview prep",
    "Project progress",
    "Open source diary",
];

/// Generated users, posts, and follow list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub users: Vec<UserProfile>,
    pub posts: Vec<Post>,
    pub followed_user_ids: Vec<String>,
}

pub fn seed_users() -> Vec<UserProfile> {
    vec![
        UserProfile::new("u1", "Pincheng", 1).with_bio("Photography and everyday life"),
        UserProfile::new("u2", "CS Student", 2).with_bio("Grinding for grad school"),
        UserProfile::new("u3", "OH Dev", 3).with_bio("OpenHarmony enthusiast"),
        UserProfile::new("u4", "Lab Member", 1).with_bio("Part of the lab crew"),
        UserProfile::new("u5", "Classmate A", 2).with_bio("Loves sports"),
        UserProfile::new("u6", "Classmate B", 3).with_bio("Food sharing"),
    ]
}

/// Build the seed set with creation times counted back from `now`.
pub fn generate(now: i64) -> SeedData {
    let users = seed_users();
    let posts = (1..=SEED_POST_COUNT)
        .map(|ordinal| seed_post(ordinal, &users, now))
        .collect();

    SeedData {
        users,
        posts,
        followed_user_ids: SEED_FOLLOWED_IDS.iter().map(ToString::to_string).collect(),
    }
}

fn seed_post(ordinal: PostId, users: &[UserProfile], now: i64) -> Post {
    let author = &users[round_robin(ordinal, users.len())];
    let title = SEED_TITLES[round_robin(ordinal, SEED_TITLES.len())];

    Post {
        id: ordinal,
        title: format!("{title} #{ordinal}"),
        content: format!(
            "This is test note #{ordinal}, used to check masonry feed scrolling and rendering."
        ),
        cover_index: Post::default_cover_index(ordinal),
        cover_uri: None,
        cover_height: cover_height_for(ordinal),
        images: Vec::new(),
        author: author.name.clone(),
        author_id: author.id.clone(),
        author_avatar_index: author.avatar_index,
        like_count: (ordinal * 7) % 200,
        liked: ordinal % 5 == 0,
        collected: ordinal % 7 == 0,
        collect_count: (ordinal * 3) % 100,
        comment_count: (ordinal * 2) % 50,
        created_at: now - ordinal * HOUR_MS,
    }
}

fn round_robin(ordinal: PostId, len: usize) -> usize {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    usize::try_from(ordinal.rem_euclid(len)).unwrap_or(0)
}
