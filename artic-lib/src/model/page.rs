//! Page type for paginated listing results.

use serde::Deserialize;

use super::Artwork;
use super::ArtworkId;
use super::Pagination;

/// One page of the artwork listing with its pagination metadata.
///
/// A page is transient: it is replaced by the next fetch and never merged
/// with other pages.
///
/// # Example
///
/// ```ignore
/// let page = client.fetch_page(3).await?;
///
/// for artwork in page.records() {
///     println!("{} {:?}", artwork.id, artwork.title);
/// }
///
/// println!("page {} of {:?}", page.page(), page.total_pages());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// The one-based index that was requested.
    page: u32,
    records: Vec<Artwork>,
    pagination: Pagination,
}

impl PageResult {
    /// Creates a page with records and pagination metadata.
    pub fn new(page: u32, records: Vec<Artwork>, pagination: Pagination) -> Self {
        Self {
            page,
            records,
            pagination,
        }
    }

    /// Returns the page index this result was fetched for.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Artwork> {
        self.records
    }

    /// Returns the identifiers of this page's records, in order.
    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.records.iter().map(|r| r.id)
    }

    /// Returns the pagination metadata.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Returns the total page count reported by the server, if any.
    pub fn total_pages(&self) -> Option<u32> {
        self.pagination.total_pages
    }

    /// Returns the total record count reported by the server, if any.
    pub fn total_count(&self) -> Option<u64> {
        self.pagination.total
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the server indicates another page follows.
    pub fn has_more(&self) -> bool {
        if self.pagination.next_url.is_some() {
            return true;
        }
        self.pagination
            .total_pages
            .is_some_and(|total| self.page < total)
    }
}

/// Wire shape of the listing response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingResponse {
    pub data: Vec<Artwork>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl ListingResponse {
    pub(crate) fn into_page(self, page: u32) -> PageResult {
        PageResult::new(page, self.data, self.pagination)
    }
}
