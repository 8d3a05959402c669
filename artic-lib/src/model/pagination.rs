//! Pagination metadata.

use serde::Deserialize;
use serde::Serialize;

/// Pagination block returned alongside every page of records.
///
/// The server normally fills every field, but none of them are relied upon
/// to be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Total number of records in the catalog.
    pub total: Option<u64>,
    /// Page size used by the server.
    pub limit: Option<u32>,
    /// Offset of the first record of this page.
    pub offset: Option<u64>,
    /// Total number of pages.
    pub total_pages: Option<u32>,
    /// One-based index of this page.
    pub current_page: Option<u32>,
    /// Link to the next page, absent on the last one.
    pub next_url: Option<String>,
}

impl Pagination {
    /// Creates pagination with just a page count.
    pub fn with_total_pages(total_pages: u32) -> Self {
        Self {
            total_pages: Some(total_pages),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_block() {
        let json = r#"{
            "total": 129884,
            "limit": 12,
            "offset": 24,
            "total_pages": 10824,
            "current_page": 3,
            "prev_url": "https://api.artic.edu/api/v1/artworks?page=2",
            "next_url": "https://api.artic.edu/api/v1/artworks?page=4"
        }"#;

        let pagination: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(pagination.total, Some(129884));
        assert_eq!(pagination.limit, Some(12));
        assert_eq!(pagination.offset, Some(24));
        assert_eq!(pagination.total_pages, Some(10824));
        assert_eq!(pagination.current_page, Some(3));
        assert!(pagination.next_url.is_some());
    }

    #[test]
    fn test_deserialize_empty_block() {
        let pagination: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(pagination, Pagination::default());
    }
}
