//! Remote feed API client.
//!
//! The engine only sees [`RemoteClient`]; [`HttpRemoteClient`] is the
//! production transport.

mod envelope;
mod http;

use serde_json::Value;
use thiserror::Error;

pub use envelope::{ApiEnvelope, DEFAULT_FAILURE_MESSAGE};
pub use http::{HttpRemoteClient, DEFAULT_REQUEST_TIMEOUT};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("{0}")]
    Api(String),
    #[error("Unexpected payload shape: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Typed GET/POST access to the feed backend.
///
/// Both calls return the unwrapped `data` of a successful envelope
/// (`Value::Null` when the envelope carried none).
#[allow(async_fn_in_trait)]
pub trait RemoteClient {
    async fn get(&self, path: &str) -> ApiResult<Value>;

    async fn post(&self, path: &str, body: Value) -> ApiResult<Value>;

    /// Replace the bearer token attached to later requests.
    async fn set_token(&self, token: Option<String>);
}
