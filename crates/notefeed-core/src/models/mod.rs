//! Data models for notefeed

mod comment;
mod post;
mod user;

pub use comment::Comment;
pub use post::{cover_height_for, Post, PostId, COVER_HEIGHTS};
pub use user::{Account, UserProfile, DEFAULT_AVATAR_INDEX};
