//! Page view controller.
//!
//! [`PageView`] owns everything the table shows: the current page index, its
//! records, pagination bounds, loading state and the cross-page selection.
//! It never performs I/O itself. Navigation hands out a [`PageTicket`] that
//! the caller fetches (usually on a spawned task) and feeds back through
//! [`PageView::complete_page`]; results for a ticket that has since been
//! superseded are dropped. Bulk selection works the same way with
//! [`BulkTicket`].

use std::collections::HashSet;

use log::debug;
use log::info;
use log::warn;

use crate::error::Error;
use crate::model::Artwork;
use crate::model::ArtworkId;
use crate::model::PageResult;
use crate::selection::BulkOutcome;
use crate::selection::BulkRequest;
use crate::selection::SelectionSet;
use crate::selection::accumulate;
use crate::source::PageSource;

/// Whether a page fetch is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}

/// Identifies one page fetch issued by a [`PageView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageTicket {
    page: u32,
    seq: u64,
}

impl PageTicket {
    /// The page index to fetch.
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Identifies one bulk selection run issued by a [`PageView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BulkTicket(u64);

/// What happened to a completed page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Records and pagination were replaced.
    Applied,
    /// The fetch was superseded; nothing changed.
    Stale,
    /// The fetch failed; the previous page stays visible.
    Failed,
}

/// What happened to a completed bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkStatus {
    /// The selection was replaced; carries the number of added rows.
    Applied { added: usize, exhausted: bool },
    /// The run was invalidated (e.g. by clear-all); nothing changed.
    Discarded,
    /// The run failed; the selection is exactly as before.
    Failed,
}

/// State of the paged table.
#[derive(Debug, Clone)]
pub struct PageView {
    page: u32,
    shown_page: u32,
    total_pages: u32,
    total_records: Option<u64>,
    records: Vec<Artwork>,
    state: LoadState,
    selection: SelectionSet,
    last_error: Option<String>,
    pending_page: Option<PageTicket>,
    pending_bulk: Option<BulkTicket>,
    next_seq: u64,
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView {
    /// Creates a view on page 1 with nothing loaded and nothing selected.
    pub fn new() -> Self {
        Self {
            page: 1,
            shown_page: 1,
            total_pages: 1,
            total_records: None,
            records: Vec::new(),
            state: LoadState::Idle,
            selection: SelectionSet::new(),
            last_error: None,
            pending_page: None,
            pending_bulk: None,
            next_seq: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current page index (the one requested most recently).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The page index the displayed records belong to.
    pub fn shown_page(&self) -> u32 {
        self.shown_page
    }

    /// Total page count, never below 1.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Total record count reported by the last page, if any.
    pub fn total_records(&self) -> Option<u64> {
        self.total_records
    }

    /// Records of the displayed page.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    pub fn load_state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Returns `true` while a bulk selection run is outstanding.
    pub fn is_bulk_running(&self) -> bool {
        self.pending_bulk.is_some()
    }

    /// The cross-page selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Number of selected artworks across all pages.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Displayed records that are selected, in page order.
    pub fn selected_rows(&self) -> Vec<&Artwork> {
        self.selection.selected_on(&self.records)
    }

    /// Returns `true` if the record with `id` is selected.
    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selection.contains(id)
    }

    /// Message of the most recent failure, cleared on the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns `true` if "previous" would do something.
    pub fn can_go_prev(&self) -> bool {
        self.navigation_allowed() && self.page > 1
    }

    /// Returns `true` if "next" would do something.
    pub fn can_go_next(&self) -> bool {
        self.navigation_allowed() && self.page < self.total_pages
    }

    /// Returns `true` if a bulk run may be started now.
    pub fn can_bulk_select(&self) -> bool {
        !self.is_loading() && !self.is_bulk_running()
    }

    fn navigation_allowed(&self) -> bool {
        !self.is_loading() && !self.is_bulk_running()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Moves to the previous page. `None` at page 1, while loading, or
    /// during a bulk run.
    pub fn prev_page(&mut self) -> Option<PageTicket> {
        if !self.can_go_prev() {
            return None;
        }
        Some(self.issue_page(self.page - 1))
    }

    /// Moves to the next page. `None` at the last page, while loading, or
    /// during a bulk run.
    pub fn next_page(&mut self) -> Option<PageTicket> {
        if !self.can_go_next() {
            return None;
        }
        Some(self.issue_page(self.page + 1))
    }

    /// Jumps to `page`, clamped to `1..=total_pages`.
    ///
    /// Unlike prev/next this is allowed while a page is loading; the earlier
    /// fetch becomes stale. Refused during a bulk run.
    pub fn go_to_page(&mut self, page: u32) -> Option<PageTicket> {
        if self.is_bulk_running() {
            return None;
        }
        let page = page.clamp(1, self.total_pages.max(1));
        Some(self.issue_page(page))
    }

    /// Fetches the current page again.
    pub fn reload(&mut self) -> Option<PageTicket> {
        self.go_to_page(self.page)
    }

    fn issue_page(&mut self, page: u32) -> PageTicket {
        let ticket = PageTicket {
            page,
            seq: self.bump_seq(),
        };
        if let Some(previous) = self.pending_page.replace(ticket) {
            debug!(
                "Page {} fetch superseded by page {}",
                previous.page, ticket.page
            );
        }
        self.page = page;
        self.state = LoadState::Loading;
        ticket
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Applies the result of a page fetch.
    ///
    /// Only the most recently issued ticket is honoured. On failure the
    /// displayed records stay as they were and the current page index falls
    /// back to the displayed page.
    pub fn complete_page(
        &mut self,
        ticket: PageTicket,
        result: Result<PageResult, Error>,
    ) -> PageOutcome {
        if self.pending_page != Some(ticket) {
            debug!("Discarding stale result for page {}", ticket.page);
            return PageOutcome::Stale;
        }
        self.pending_page = None;
        self.state = LoadState::Idle;

        match result {
            Ok(result) => {
                // Keep the last known total when the server omits it.
                if let Some(total) = result.total_pages() {
                    self.total_pages = total.max(1);
                }
                if let Some(count) = result.total_count() {
                    self.total_records = Some(count);
                }
                self.shown_page = ticket.page;
                self.page = ticket.page.min(self.total_pages);
                self.records = result.into_records();
                self.last_error = None;
                debug!(
                    "Showing page {} of {} ({} records)",
                    self.shown_page,
                    self.total_pages,
                    self.records.len()
                );
                PageOutcome::Applied
            }
            Err(e) => {
                warn!(
                    "Keeping page {} after failed fetch of page {}: {}",
                    self.shown_page, ticket.page, e
                );
                self.page = self.shown_page;
                self.last_error = Some(e.to_string());
                PageOutcome::Failed
            }
        }
    }

    /// Fetches `page` from `source` and applies the result inline.
    pub async fn load<S>(&mut self, source: &S, page: u32) -> PageOutcome
    where
        S: PageSource + ?Sized,
    {
        let Some(ticket) = self.go_to_page(page) else {
            return PageOutcome::Stale;
        };
        let result = source.fetch_page(ticket.page()).await;
        self.complete_page(ticket, result)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Applies the set of rows reported as checked on the displayed page.
    ///
    /// Checked rows are added, unchecked rows of this page are removed, and
    /// selections on other pages are untouched. Ignored during a bulk run.
    pub fn reconcile_page_selection<I>(&mut self, selected: I) -> bool
    where
        I: IntoIterator<Item = ArtworkId>,
    {
        if self.is_bulk_running() {
            debug!("Ignoring page selection change during bulk select");
            return false;
        }
        let page_ids: Vec<ArtworkId> = self.records.iter().map(|r| r.id).collect();
        self.selection.reconcile_page(page_ids, selected);
        true
    }

    /// Flips one displayed row.
    pub fn toggle_row(&mut self, id: ArtworkId) -> bool {
        if !self.records.iter().any(|r| r.id == id) {
            return false;
        }
        let mut checked: HashSet<ArtworkId> = self.selected_rows().iter().map(|r| r.id).collect();
        if !checked.remove(&id) {
            checked.insert(id);
        }
        self.reconcile_page_selection(checked)
    }

    /// Header checkbox: selects every displayed row, or deselects them all
    /// if they are all selected already.
    pub fn toggle_page(&mut self) -> bool {
        if self.records.is_empty() {
            return false;
        }
        let all_selected = self.records.iter().all(|r| self.selection.contains(r.id));
        let checked: Vec<ArtworkId> = if all_selected {
            Vec::new()
        } else {
            self.records.iter().map(|r| r.id).collect()
        };
        self.reconcile_page_selection(checked)
    }

    /// Header checkbox state for the displayed page.
    pub fn page_check_state(&self) -> PageCheck {
        let selected = self.selected_rows().len();
        if selected == 0 {
            PageCheck::None
        } else if selected == self.records.len() {
            PageCheck::All
        } else {
            PageCheck::Some
        }
    }

    /// Empties the selection. Any bulk run in flight is invalidated.
    pub fn clear_selection(&mut self) {
        if let Some(ticket) = self.pending_bulk.take() {
            info!("Clear-all invalidated bulk select run {}", ticket.0);
        }
        self.selection.clear();
    }

    // =========================================================================
    // Bulk selection
    // =========================================================================

    /// Starts a bulk run of `target` rows from the current page.
    ///
    /// Returns `None` for a zero target, while a page is loading, or while
    /// another run is in flight.
    pub fn begin_bulk(&mut self, target: usize) -> Option<(BulkTicket, BulkRequest)> {
        if target == 0 || !self.can_bulk_select() {
            return None;
        }
        let ticket = BulkTicket(self.bump_seq());
        self.pending_bulk = Some(ticket);
        let request = BulkRequest::new(self.page, target, self.selection.clone())
            .known_total_pages(self.total_pages);
        Some((ticket, request))
    }

    /// Applies the result of a bulk run. The selection is replaced only on
    /// success of the ticket still in flight.
    pub fn complete_bulk(
        &mut self,
        ticket: BulkTicket,
        result: Result<BulkOutcome, Error>,
    ) -> BulkStatus {
        if self.pending_bulk != Some(ticket) {
            debug!("Discarding result of bulk select run {}", ticket.0);
            return BulkStatus::Discarded;
        }
        self.pending_bulk = None;

        match result {
            Ok(outcome) => {
                self.selection = outcome.selection;
                self.last_error = None;
                BulkStatus::Applied {
                    added: outcome.added,
                    exhausted: outcome.exhausted,
                }
            }
            Err(e) => {
                warn!("Bulk select failed, selection unchanged: {}", e);
                self.last_error = Some(e.to_string());
                BulkStatus::Failed
            }
        }
    }

    /// Runs a bulk selection against `source` inline.
    pub async fn bulk_select<S>(&mut self, source: &S, target: usize) -> Option<BulkStatus>
    where
        S: PageSource + ?Sized,
    {
        let (ticket, request) = self.begin_bulk(target)?;
        let result = accumulate(source, &request).await;
        Some(self.complete_bulk(ticket, result))
    }
}

/// Header checkbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCheck {
    None,
    Some,
    All,
}
