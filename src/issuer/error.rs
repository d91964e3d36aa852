use http::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

const MAX_RAW_BODY_CHARS: usize = 512;

/// Failure to obtain a link token.
///
/// Every variant renders the same generic message; the cause is kept for logs.
#[derive(Debug, Error)]
pub enum IssuanceError {
    #[error("Could not create link token")]
    Transport(#[source] reqwest::Error),

    #[error("Could not create link token")]
    Rejected { status: StatusCode, detail: VendorError },

    #[error("Could not create link token")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("Could not create link token")]
    EmptyToken,
}

impl IssuanceError {
    /// Low-cardinality label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            IssuanceError::Transport(e) if e.is_timeout() => "timeout",
            IssuanceError::Transport(_) => "transport",
            IssuanceError::Rejected { .. } => "rejected",
            IssuanceError::MalformedResponse(_) => "malformed_response",
            IssuanceError::EmptyToken => "empty_token",
        }
    }
}

/// Error body returned by the vendor on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct VendorError {
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub display_message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl VendorError {
    /// Parses the vendor error body; falls back to the (truncated) raw text.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| VendorError {
            error_message: Some(body.chars().take(MAX_RAW_BODY_CHARS).collect()),
            ..Default::default()
        })
    }
}

impl fmt::Display for VendorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={} code={} message={} request_id={}",
            self.error_type.as_deref().unwrap_or("-"),
            self.error_code.as_deref().unwrap_or("-"),
            self.error_message.as_deref().unwrap_or("-"),
            self.request_id.as_deref().unwrap_or("-"),
        )
    }
}
