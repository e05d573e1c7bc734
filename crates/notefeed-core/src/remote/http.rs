//! `reqwest` transport for the feed backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{ApiEnvelope, ApiError, ApiResult, RemoteClient};
use crate::util::{compact_text, normalize_base_url, normalize_text_option};

/// Applied to both the connect leg and the whole request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct HttpRemoteClient {
    base_url: String,
    client: Client,
    token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for HttpRemoteClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("HttpRemoteClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl HttpRemoteClient {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let base_url = normalize_base_url(&base_url.into())
            .map_err(|reason| ApiError::InvalidConfiguration(reason.to_string()))?;
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url,
            client,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `request` must already carry its `Content-Type`.
    async fn send(&self, request: RequestBuilder) -> ApiResult<Value> {
        let mut request = request.header(ACCEPT, "application/json");
        if let Some(token) = self.token.read().await.clone() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Api(parse_api_error(status, &body)));
        }

        ApiEnvelope::parse(&body)?.into_data()
    }
}

impl RemoteClient for HttpRemoteClient {
    async fn get(&self, path: &str) -> ApiResult<Value> {
        tracing::debug!("GET {}", path);
        let request = self
            .client
            .get(self.url(path))
            .header(CONTENT_TYPE, "application/json");
        self.send(request).await
    }

    async fn post(&self, path: &str, body: Value) -> ApiResult<Value> {
        tracing::debug!("POST {}", path);
        // `json` sets the content type
        self.send(self.client.post(self.url(path)).json(&body)).await
    }

    async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = normalize_text_option(token);
    }
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = ApiEnvelope::parse(body) {
        if let Some(message) = envelope.message() {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
