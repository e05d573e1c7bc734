//! Local key-value persistence for the feed cache.
//!
//! [`LocalStore`] is the raw string-keyed substrate; [`Preferences`] layers
//! the typed collections on top of it.

mod memory;
mod preferences;
mod sqlite;

use thiserror::Error;

pub use memory::MemoryStore;
pub use preferences::Preferences;
pub use sqlite::SqliteStore;

/// Errors that can occur while reading or writing the local store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store was never opened or has been shut down
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Stored value could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored value is present but none of it decodes
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Logical keys the feed persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Notes,
    UserProfile,
    Followings,
    Comments,
    /// Legacy local accounts; not written by the engine
    Accounts,
    /// Legacy current-user id; not written by the engine
    CurrentUid,
}

impl StoreKey {
    pub const ALL: [Self; 6] = [
        Self::Notes,
        Self::UserProfile,
        Self::Followings,
        Self::Comments,
        Self::Accounts,
        Self::CurrentUid,
    ];

    /// Key name as written to the store
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes_data",
            Self::UserProfile => "user_profile",
            Self::Followings => "followings",
            Self::Comments => "comments_data",
            Self::Accounts => "accounts_data",
            Self::CurrentUid => "current_uid",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable string-keyed storage (async)
#[allow(async_fn_in_trait)]
pub trait LocalStore {
    /// Read the raw value for a key; `None` when absent
    async fn get(&self, key: StoreKey) -> StoreResult<Option<String>>;

    /// Write (replace) the raw value for a key
    async fn put(&self, key: StoreKey, value: &str) -> StoreResult<()>;

    /// Remove a key; removing an absent key is not an error
    async fn delete(&self, key: StoreKey) -> StoreResult<()>;

    /// Remove every key
    async fn clear(&self) -> StoreResult<()>;
}
