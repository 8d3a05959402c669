//! In-memory page source.

use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use log::error;

use super::PageSource;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Artwork;
use crate::model::PageResult;
use crate::model::Pagination;

/// A fixed catalog served page by page from memory.
///
/// Counts every fetch and can be told to fail on a given page, which makes it
/// the source of choice for exercising accumulation and navigation.
///
/// # Example
///
/// ```ignore
/// let source = MemorySource::from_pages(vec![
///     vec![Artwork::new(1), Artwork::new(2)],
///     vec![Artwork::new(3)],
/// ]);
///
/// let page = source.fetch_page(2).await?;
/// assert_eq!(source.fetch_count(), 1);
/// ```
#[derive(Debug)]
pub struct MemorySource {
    pages: Vec<Vec<Artwork>>,
    report_total_pages: bool,
    fail_on: Mutex<Option<u32>>,
    fetches: AtomicUsize,
    history: Mutex<Vec<u32>>,
}

impl MemorySource {
    /// Creates a source from pre-split pages.
    pub fn from_pages(pages: Vec<Vec<Artwork>>) -> Self {
        Self {
            pages,
            report_total_pages: true,
            fail_on: Mutex::new(None),
            fetches: AtomicUsize::new(0),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Creates a source by splitting `records` into pages of `page_size`.
    pub fn paginate(records: Vec<Artwork>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let pages = records.chunks(page_size).map(<[Artwork]>::to_vec).collect();
        Self::from_pages(pages)
    }

    /// Omits `total_pages` from every response.
    pub fn without_total_pages(mut self) -> Self {
        self.report_total_pages = false;
        self
    }

    /// Makes every fetch of `page` fail with a 500 status.
    pub fn fail_on(self, page: u32) -> Self {
        self.set_fail_on(Some(page));
        self
    }

    /// Changes the failing page at runtime (`None` disables failures).
    pub fn set_fail_on(&self, page: Option<u32>) {
        if let Ok(mut fail_on) = self.fail_on.lock() {
            *fail_on = page;
        }
    }

    /// Returns the number of pages in the catalog.
    pub fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Returns how many fetches were issued, including failed ones.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Returns the requested page indices in call order.
    pub fn history(&self) -> Vec<u32> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch_page(&self, page: u32) -> Result<PageResult, Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut history) = self.history.lock() {
            history.push(page);
        }

        if page == 0 {
            return Err(Error::InvalidPage(page));
        }

        let failing = self.fail_on.lock().ok().and_then(|f| *f);
        if failing == Some(page) {
            let err = ApiError::http(500, "Internal Server Error");
            error!("Failed to fetch artworks page {}: {}", page, err);
            return Err(err.into());
        }

        let records = self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default();
        let total: u64 = self.pages.iter().map(|p| p.len() as u64).sum();
        let limit = self.pages.first().map(|p| p.len() as u32);
        let offset: u64 = self
            .pages
            .iter()
            .take(page as usize - 1)
            .map(|p| p.len() as u64)
            .sum();

        let pagination = Pagination {
            total: Some(total),
            limit,
            offset: Some(offset),
            total_pages: self.report_total_pages.then(|| self.total_pages()),
            current_page: Some(page),
            next_url: None,
        };

        Ok(PageResult::new(page, records, pagination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MemorySource {
        MemorySource::paginate((1..=5).map(Artwork::new).collect(), 2)
    }

    #[tokio::test]
    async fn test_paginate_splits_records() {
        let source = catalog();
        assert_eq!(source.total_pages(), 3);

        let last = source.fetch_page(3).await.unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last.total_pages(), Some(3));
        assert_eq!(last.pagination().offset, Some(4));
        assert_eq!(last.total_count(), Some(5));
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let source = catalog();
        let page = source.fetch_page(9).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_failure_and_history() {
        let source = catalog().fail_on(2);
        assert!(source.fetch_page(1).await.is_ok());
        let err = source.fetch_page(2).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(source.fetch_count(), 2);
        assert_eq!(source.history(), vec![1, 2]);
    }
}
