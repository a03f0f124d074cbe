//! Error handling types and utilities.

use reqwest::StatusCode;

/// A specialized Result type for blepp-client glue code.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase. Backend calls return
/// [`ApiError`] instead so callers can branch on the failure.
pub type Result<T> = anyhow::Result<T>;

/// Error returned by every backend call made through [`crate::api::ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    ///
    /// `message` is the response body, or `Request failed with status <n>`
    /// when the body was empty.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("unexpected response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Input was rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The configured base URL cannot be joined with a request path.
    #[error("invalid request url for {path}: {source}")]
    Url {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// Builds the HTTP variant, falling back to a status message for empty bodies.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("Request failed with status {}", status.as_u16())
        } else {
            body.to_string()
        };
        Self::Http { status, message }
    }

    /// HTTP status, if the backend answered at all.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}

/// Client-side form validation failure.
///
/// The message is the text shown inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Field that failed, when the failure is attributable to one.
    pub field: Option<&'static str>,
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }
}
