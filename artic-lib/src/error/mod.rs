//! Error types

mod api;

pub use api::*;

/// Top-level error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the remote listing endpoint.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Page indices are one-based; zero is never sent to the server.
    #[error("Invalid page index: {0}")]
    InvalidPage(u32),
}

impl Error {
    /// Returns `true` for network-level failures (connection, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Api(ApiError::Network(_)) | Self::Api(ApiError::Timeout(_))
        )
    }

    /// Returns `true` when the server answered with a non-success status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Api(ApiError::Http { .. }))
    }

    /// Returns the HTTP status code if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            _ => None,
        }
    }
}
