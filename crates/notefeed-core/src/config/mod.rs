//! Client configuration.
//!
//! Resolves the backend address, request timeout, and on-disk store location
//! from environment variables or a JSON payload, and wires them into a
//! ready-to-initialize [`SyncEngine`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::SyncEngine;
use crate::error::{Error, Result};
use crate::remote::HttpRemoteClient;
use crate::store::SqliteStore;
use crate::util::{normalize_base_url, normalize_text_option};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

pub const API_BASE_URL_ENV: &str = "NOTEFEED_API_BASE_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "NOTEFEED_REQUEST_TIMEOUT_SECS";
pub const STORE_PATH_ENV: &str = "NOTEFEED_STORE_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// `SQLite` file for the local cache; in-memory when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            store_path: None,
        }
    }
}

impl ClientConfig {
    /// Load from `NOTEFEED_*` environment variables, defaulting anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = normalize_text_option(lookup(API_BASE_URL_ENV)) {
            config.api_base_url = url;
        }
        if let Some(raw) = normalize_text_option(lookup(REQUEST_TIMEOUT_ENV)) {
            config.request_timeout_secs = raw.parse().map_err(|_| {
                Error::Config(format!(
                    "{REQUEST_TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
        }
        config.store_path = normalize_text_option(lookup(STORE_PATH_ENV)).map(PathBuf::from);
        config.normalized()
    }

    fn normalized(mut self) -> Result<Self> {
        self.api_base_url = normalize_base_url(&self.api_base_url)
            .map_err(|reason| Error::Config(format!("api_base_url: {reason}")))?;

        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        self.store_path = self
            .store_path
            .filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty());
        Ok(self)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn remote_client(&self) -> Result<HttpRemoteClient> {
        Ok(HttpRemoteClient::with_timeout(
            self.api_base_url.clone(),
            self.request_timeout(),
        )?)
    }

    pub fn open_store(&self) -> Result<SqliteStore> {
        let store = match &self.store_path {
            Some(path) => {
                tracing::info!("Opening local store at {}", path.display());
                SqliteStore::open(path)?
            }
            None => {
                tracing::debug!("No store path configured, using in-memory store");
                SqliteStore::open_in_memory()?
            }
        };
        Ok(store)
    }

    /// Build an engine against the configured backend and store. Call
    /// [`SyncEngine::initialize`] before use.
    pub fn build_engine(&self) -> Result<SyncEngine<HttpRemoteClient, SqliteStore>> {
        Ok(SyncEngine::new(self.remote_client()?, self.open_store()?))
    }
}

/// Parse and normalize a JSON config payload.
pub fn parse_client_config(payload: &str) -> Result<ClientConfig> {
    let config: ClientConfig = serde_json::from_str(payload)
        .map_err(|error| Error::Config(format!("invalid client config JSON: {error}")))?;
    config.normalized()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
