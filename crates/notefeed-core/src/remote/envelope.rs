//! Response envelope decoding.

use serde::Deserialize;
use serde_json::Value;

use super::{ApiError, ApiResult};

/// Message used when a failed envelope carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "request failed";

/// The two envelope shapes the backend speaks.
///
/// `Flag` is tried first, so a body carrying both `ok` and `code` is judged
/// by `ok`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope {
    Flag {
        ok: bool,
        #[serde(default)]
        msg: Option<String>,
        #[serde(default)]
        data: Option<Value>,
    },
    Coded {
        code: i64,
        #[serde(default)]
        msg: Option<String>,
        #[serde(default)]
        data: Option<Value>,
    },
}

impl ApiEnvelope {
    /// Parse a raw response body.
    ///
    /// Non-JSON is [`ApiError::InvalidJson`]; JSON that matches neither
    /// shape counts as a failed envelope.
    pub fn parse(body: &str) -> ApiResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|_| ApiError::InvalidJson(crate::util::compact_text(body)))?;
        Ok(serde_json::from_value(value).unwrap_or(Self::Flag {
            ok: false,
            msg: None,
            data: None,
        }))
    }

    pub const fn is_success(&self) -> bool {
        match self {
            Self::Flag { ok, .. } => *ok,
            Self::Coded { code, .. } => *code == 0,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Flag { msg, .. } | Self::Coded { msg, .. } => msg.as_deref(),
        }
    }

    /// Unwrap `data` on success, otherwise fail with the envelope message.
    pub fn into_data(self) -> ApiResult<Value> {
        if !self.is_success() {
            let message = self
                .message()
                .map_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string(), ToString::to_string);
            return Err(ApiError::Api(message));
        }
        match self {
            Self::Flag { data, .. } | Self::Coded { data, .. } => Ok(data.unwrap_or(Value::Null)),
        }
    }
}
