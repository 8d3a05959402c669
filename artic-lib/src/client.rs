//! Main ArticClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;

/// Base URL of the public Art Institute of Chicago API.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Fields requested by default: the identifier plus every displayed column.
pub const DEFAULT_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// The client for the artwork listing endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be moved
/// into spawned tasks freely.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use artic_lib::ArticClient;
///
/// let client = ArticClient::builder()
///     .timeout(Duration::from_secs(10))
///     .page_size(25)
///     .build()?;
///
/// let page = client.fetch_page(1).await?;
/// ```
#[derive(Clone)]
pub struct ArticClient {
    pub(crate) inner: Arc<ArticClientInner>,
}

pub(crate) struct ArticClientInner {
    pub(crate) base_url: Url,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
    pub(crate) page_size: Option<u32>,
    pub(crate) fields: Option<Vec<String>>,
}

impl ArticClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder {
        ArticClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Returns the configured page size, if any.
    pub fn page_size(&self) -> Option<u32> {
        self.inner.page_size
    }
}

impl std::fmt::Debug for ArticClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("page_size", &self.inner.page_size)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing an [`ArticClient`].
///
/// Every setting has a default, so `ArticClient::builder().build()` talks to
/// the public API with the server's default page size.
///
/// # Example
///
/// ```ignore
/// let client = ArticClient::builder()
///     .base_url("http://127.0.0.1:8080/api/v1")
///     .fields(["id", "title"])
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct ArticClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    page_size: Option<u32>,
    fields: Option<Vec<String>>,
    user_agent: Option<String>,
    http_client: Option<Client>,
}

impl ArticClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            page_size: None,
            fields: Some(DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()),
            user_agent: None,
            http_client: None,
        }
    }

    /// Sets the API base URL (without the `/artworks` suffix).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the number of records per page (`limit` query parameter).
    ///
    /// If not set, the server default is used.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Restricts the fields returned for each record.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Requests every field the server offers.
    pub fn all_fields(mut self) -> Self {
        self.fields = None;
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`ArticClient`].
    pub fn build(self) -> Result<ArticClient, Error> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(self.base_url).into());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ArticClient {
            inner: Arc::new(ArticClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
                page_size: self.page_size,
                fields: self.fields,
            }),
        })
    }
}

impl Default for ArticClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder() {
        let client = ArticClient::builder().build().unwrap();
        assert_eq!(client.base_url(), "https://api.artic.edu/api/v1");
        assert_eq!(client.page_size(), None);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ArticClient::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidUrl(_))));
    }
}
