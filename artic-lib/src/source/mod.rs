//! Sources of listing pages.
//!
//! The accumulator and the page view controller only need "give me page N".
//! [`PageSource`] captures that, so they run the same against the live API
//! ([`ArticClient`](crate::ArticClient)) and an in-memory catalog
//! (`MemorySource`, behind the `test-util` feature).

#[cfg(any(test, feature = "test-util"))]
mod memory;

#[cfg(any(test, feature = "test-util"))]
pub use memory::MemorySource;

use async_trait::async_trait;

use crate::ArticClient;
use crate::error::Error;
use crate::model::PageResult;

/// Something that can produce one page of the listing by one-based index.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page at `page`.
    async fn fetch_page(&self, page: u32) -> Result<PageResult, Error>;
}

#[async_trait]
impl PageSource for ArticClient {
    async fn fetch_page(&self, page: u32) -> Result<PageResult, Error> {
        ArticClient::fetch_page(self, page).await
    }
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for std::sync::Arc<S> {
    async fn fetch_page(&self, page: u32) -> Result<PageResult, Error> {
        (**self).fetch_page(page).await
    }
}
