//! SOS API error types

use thiserror::Error;

/// Errors that can occur when talking to the SOS API
#[derive(Debug, Error)]
pub enum SosApiError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication rejected
    #[error("Unauthorized")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Service answered with a status the caller does not accept
    #[error("Unexpected status: HTTP {status}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
    },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SosApiError {
    /// Map a transport-level reqwest error
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Map a non-accepted HTTP status
    pub(crate) fn from_status(status: reqwest::StatusCode, resource: &str) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(resource.to_string()),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            },
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            other => Self::UnexpectedStatus {
                status: other.as_u16(),
            },
        }
    }

    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded
        )
    }
}
