//! Error types for notefeed-core

use thiserror::Error;

use crate::remote::ApiError;
use crate::store::StoreError;

/// Result type alias using notefeed-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by constructors and configuration loading.
///
/// Engine operations never return these; they degrade instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Remote API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
