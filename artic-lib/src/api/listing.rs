//! Listing endpoint: one page of artworks per request.

use log::debug;
use log::error;
use reqwest::header::ACCEPT;
use reqwest::header::HeaderValue;
use url::Url;

use crate::ArticClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::ListingResponse;
use crate::model::PageResult;

impl ArticClient {
    /// Fetches one page of the artwork listing.
    ///
    /// `page` is one-based. Every call goes to the network; nothing is cached
    /// and nothing is retried. Failures are logged here and returned to the
    /// caller unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPage`] for page `0`, without touching the network
    /// - [`ApiError::Network`] / [`ApiError::Timeout`] on transport failure
    /// - [`ApiError::Http`] on a non-success status
    /// - [`ApiError::Parse`] when the body is not a listing response
    pub async fn fetch_page(&self, page: u32) -> Result<PageResult, Error> {
        if page == 0 {
            error!("Refusing to fetch page 0 (pages are one-based)");
            return Err(Error::InvalidPage(page));
        }

        let url = self.listing_url(page)?;
        debug!("GET {}", url);

        let mut request = self
            .inner
            .http_client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            let err = self.transport_error(e);
            error!("Failed to fetch artworks page {}: {}", page, err);
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            let err = ApiError::http(status.as_u16(), reason);
            error!("Failed to fetch artworks page {}: {}", page, err);
            return Err(err.into());
        }

        let body = response.text().await.map_err(|e| {
            let err = self.transport_error(e);
            error!("Failed to read artworks page {}: {}", page, err);
            err
        })?;

        let listing: ListingResponse = serde_json::from_str(&body).map_err(|e| {
            let err = ApiError::parse_with_body(e.to_string(), body.clone());
            error!("Failed to parse artworks page {}: {}", page, err);
            err
        })?;

        let result = listing.into_page(page);
        debug!(
            "Fetched page {} ({} records, {:?} pages total)",
            page,
            result.len(),
            result.total_pages()
        );
        Ok(result)
    }

    /// Builds the listing URL for a page.
    pub(crate) fn listing_url(&self, page: u32) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .push("artworks");

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            if let Some(limit) = self.inner.page_size {
                query.append_pair("limit", &limit.to_string());
            }
            if let Some(fields) = &self.inner.fields {
                query.append_pair("fields", &fields.join(","));
            }
        }

        Ok(url)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_defaults() {
        let client = ArticClient::builder().all_fields().build().unwrap();
        assert_eq!(
            client.listing_url(7).unwrap().as_str(),
            "https://api.artic.edu/api/v1/artworks?page=7"
        );
    }

    #[test]
    fn test_listing_url_with_limit_and_fields() {
        let client = ArticClient::builder()
            .base_url("http://localhost:8080/api/v1/")
            .page_size(2)
            .fields(["id", "title"])
            .build()
            .unwrap();
        assert_eq!(
            client.listing_url(1).unwrap().as_str(),
            "http://localhost:8080/api/v1/artworks?page=1&limit=2&fields=id%2Ctitle"
        );
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected_before_request() {
        let client = ArticClient::builder()
            .base_url("http://127.0.0.1:9/api/v1")
            .build()
            .unwrap();
        let err = client.fetch_page(0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidPage(0)));
    }
}
