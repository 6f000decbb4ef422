//! Remote API error types
//!
//! Every failure of a request against the adoption service ends up as one of
//! these variants, so stores can turn them into a displayable message without
//! inspecting `reqwest` internals.

use thiserror::Error;

/// Errors from talking to the remote service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS or TLS failure
    #[error("Request failed: {0}")]
    Transport(String),

    /// The request did not finish within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The service answered 401; the server-side session is gone
    #[error("Session expired or not logged in ({endpoint})")]
    Unauthorized { endpoint: &'static str },

    /// Any other non-2xx answer
    #[error("{endpoint} returned HTTP {status}")]
    Status { status: u16, endpoint: &'static str },

    /// The response body was not the expected JSON
    #[error("Malformed response body: {0}")]
    Decode(String),

    /// The configured base URL cannot be used
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Returns true if the server rejected the session
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let error = ApiError::Status { status: 500, endpoint: "/dogs/search" };
        assert_eq!(error.to_string(), "/dogs/search returned HTTP 500");
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(ApiError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::Unauthorized { endpoint: "/dogs" }.is_unauthorized());
        assert!(!ApiError::Timeout.is_unauthorized());
    }
}
