//! notefeed-core - Core library for notefeed
//!
//! This crate owns the client-side data layer of the feed: the shared models,
//! the remote API client, the local key-value cache, and the sync engine that
//! reconciles them with a remote → cache → seed fallback chain.

pub mod config;
pub mod dto;
pub mod engine;
pub mod error;
pub mod models;
pub mod remote;
pub mod store;
pub mod util;

pub use engine::{AuthOutcome, EngineState, PublishOutcome, RefreshSource, SyncEngine};
pub use error::{Error, Result};
pub use models::{Comment, Post, PostId, UserProfile};
