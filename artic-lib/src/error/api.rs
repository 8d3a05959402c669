//! API error types

use std::time::Duration;

/// Errors that can occur while talking to the listing endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP status from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Reason phrase or response body.
        message: String,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_http_error_display() {
        let err = ApiError::http(503, "Service Unavailable");
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_error_classification() {
        let status: Error = ApiError::http(404, "Not Found").into();
        assert!(status.is_status());
        assert!(!status.is_transport());
        assert_eq!(status.status_code(), Some(404));

        let timeout: Error = ApiError::Timeout(Duration::from_secs(3)).into();
        assert!(timeout.is_transport());
        assert!(!timeout.is_status());
        assert_eq!(timeout.status_code(), None);

        let parse: Error = ApiError::parse_with_body("missing field `data`", "{}").into();
        assert!(!parse.is_transport());
        assert!(!parse.is_status());
    }

    #[test]
    fn test_invalid_page_display() {
        assert_eq!(Error::InvalidPage(0).to_string(), "Invalid page index: 0");
    }
}
