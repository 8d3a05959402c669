//! Bulk selection across pages.

use log::debug;
use log::info;

use super::SelectionSet;
use crate::error::Error;
use crate::model::PageResult;
use crate::source::PageSource;

/// Parameters of a bulk selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRequest {
    /// One-based page the scan starts on.
    pub start_page: u32,
    /// Number of identifiers to add. `0` is a no-op.
    pub target: usize,
    /// Page count to use when a response does not report `total_pages`.
    pub known_total_pages: u32,
    /// Selection at the time the run starts. Never mutated.
    pub existing: SelectionSet,
}

impl BulkRequest {
    /// Creates a request starting at `start_page` on top of `existing`.
    pub fn new(start_page: u32, target: usize, existing: SelectionSet) -> Self {
        Self {
            start_page,
            target,
            known_total_pages: 1,
            existing,
        }
    }

    /// Sets the fallback page count.
    pub fn known_total_pages(mut self, total_pages: u32) -> Self {
        self.known_total_pages = total_pages;
        self
    }
}

/// Result of a completed bulk selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    /// The enlarged selection.
    pub selection: SelectionSet,
    /// How many identifiers were newly added.
    pub added: usize,
    /// How many pages were fetched.
    pub pages_fetched: u32,
    /// `true` if the catalog ran out before `target` was reached.
    pub exhausted: bool,
}

/// Grows a selection by `request.target` identifiers, scanning forward from
/// `request.start_page`.
///
/// Pages are fetched one after another; records are taken in the order the
/// source returns them, and identifiers already selected do not count toward
/// the target. The scan ends when the target is met or the last page has
/// been scanned. Running out of pages is not an error.
///
/// The request's selection is copied, never modified: if any fetch fails the
/// error is returned and the caller still holds the selection it started
/// with.
pub async fn accumulate<S>(source: &S, request: &BulkRequest) -> Result<BulkOutcome, Error>
where
    S: PageSource + ?Sized,
{
    let mut selection = request.existing.clone();

    if request.target == 0 {
        debug!("Bulk select with target 0, nothing to do");
        return Ok(BulkOutcome {
            selection,
            added: 0,
            pages_fetched: 0,
            exhausted: false,
        });
    }

    info!(
        "Bulk selecting {} rows starting at page {}",
        request.target, request.start_page
    );

    let mut remaining = request.target;
    let mut page = request.start_page;

    let first = source.fetch_page(page).await?;
    let max_pages = first.total_pages().unwrap_or(request.known_total_pages);
    remaining = take_unselected(&first, &mut selection, remaining);
    let mut pages_fetched = 1;
    page += 1;

    while remaining > 0 && page <= max_pages {
        let result = source.fetch_page(page).await?;
        remaining = take_unselected(&result, &mut selection, remaining);
        pages_fetched += 1;
        page += 1;
    }

    let added = request.target - remaining;
    let exhausted = remaining > 0;
    if exhausted {
        info!(
            "Bulk select ran out of pages after page {}: added {} of {} requested",
            page - 1,
            added,
            request.target
        );
    } else {
        info!(
            "Bulk select added {} rows across {} pages",
            added, pages_fetched
        );
    }

    Ok(BulkOutcome {
        selection,
        added,
        pages_fetched,
        exhausted,
    })
}

/// Adds unselected ids from `page` until `remaining` reaches zero.
/// Returns the new remaining count.
fn take_unselected(page: &PageResult, selection: &mut SelectionSet, mut remaining: usize) -> usize {
    for id in page.ids() {
        if remaining == 0 {
            break;
        }
        if selection.insert(id) {
            remaining -= 1;
        }
    }
    debug!(
        "Scanned page {}: {} rows still to select",
        page.page(),
        remaining
    );
    remaining
}
