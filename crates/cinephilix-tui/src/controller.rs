//! Paged search controller shared by every browser page.
//!
//! The controller never performs I/O. Each transition that needs data
//! returns a [`FetchTicket`]; the caller runs the fetch and feeds the
//! outcome back through [`SearchController::complete`]. Tickets carry a
//! sequence number so only the newest request can update the page.

use std::time::{Duration, Instant};

use cinephilix_api::catalog::SearchPage;

use crate::debounce::Debouncer;
use crate::domain::SearchDomain;

/// Lifecycle of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    /// No request in flight.
    Idle,
    /// A request is in flight; previous results stay visible.
    Loading,
    /// The latest request failed; previous results stay visible.
    Error(String),
}

/// A fetch the caller must run.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket<F> {
    /// Sequence number to hand back with the outcome.
    pub seq: u64,
    /// Full filter snapshot for the request.
    pub filters: F,
}

/// Search state for one page.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchController<D: SearchDomain> {
    domain: D,
    filters: D::Filters,
    status: PageStatus,
    results: Vec<D::Item>,
    total: u64,
    current_page: u32,
    page_size: u32,
    latest_seq: u64,
    last_issued: Option<D::Filters>,
    debouncer: Debouncer,
}

impl<D: SearchDomain> SearchController<D> {
    /// Creates a controller holding the domain defaults. Nothing is fetched
    /// until the caller asks for a ticket.
    #[must_use]
    pub fn new(domain: D, page_size: u32, debounce: Duration) -> Self {
        let page_size = page_size.max(1);
        let filters = domain.defaults(page_size);
        Self {
            domain,
            filters,
            status: PageStatus::Idle,
            results: Vec::new(),
            total: 0,
            current_page: 1,
            page_size,
            latest_seq: 0,
            last_issued: None,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Backing domain.
    #[must_use]
    pub const fn domain(&self) -> &D {
        &self.domain
    }

    /// Current filter record.
    #[must_use]
    pub const fn filters(&self) -> &D::Filters {
        &self.filters
    }

    /// Request status.
    #[must_use]
    pub const fn status(&self) -> &PageStatus {
        &self.status
    }

    /// Items of the last successful fetch.
    #[must_use]
    pub fn results(&self) -> &[D::Item] {
        &self.results
    }

    /// Total matches reported by the last successful fetch.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Page reported by the last successful fetch.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page size reported by the last successful fetch.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Last page number for the current total (at least 1).
    #[must_use]
    pub fn last_page(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        u32::try_from(self.total.div_ceil(size))
            .unwrap_or(u32::MAX)
            .max(1)
    }

    /// Whether a fetch has been issued and not yet completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == PageStatus::Loading
    }

    /// Whether the filters were edited since the last fetch was issued.
    #[must_use]
    pub fn has_unapplied_edits(&self) -> bool {
        self.last_issued
            .as_ref()
            .is_some_and(|issued| *issued != self.filters)
    }

    /// Patches the filters without fetching.
    pub fn edit(&mut self, f: impl FnOnce(&mut D::Filters)) {
        f(&mut self.filters);
    }

    /// Fetches page 1 with the current filters.
    pub fn apply(&mut self) -> FetchTicket<D::Filters> {
        self.debouncer.cancel();
        D::set_page(&mut self.filters, 1);
        self.issue()
    }

    /// Re-fetches the current filters as they are.
    pub fn refresh(&mut self) -> FetchTicket<D::Filters> {
        self.issue()
    }

    /// Records a free-text edit. The fetch happens once the input settles.
    pub fn type_query(&mut self, text: &str, now: Instant) {
        D::set_query(&mut self.filters, text);
        self.debouncer.push(now);
    }

    /// When the debounce window has elapsed, fetches page 1 with the final
    /// query text.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<FetchTicket<D::Filters>> {
        if !self.debouncer.fire_if_due(now) {
            return None;
        }
        D::set_page(&mut self.filters, 1);
        Some(self.issue())
    }

    /// Pending debounce deadline.
    #[must_use]
    pub const fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Jumps to `page`, clamped to `1..=last_page`. Returns `None` when the
    /// clamped page is already displayed.
    pub fn set_page(&mut self, page: u32) -> Option<FetchTicket<D::Filters>> {
        let page = page.clamp(1, self.last_page());
        if page == self.current_page && D::page(&self.filters) == page {
            return None;
        }
        D::set_page(&mut self.filters, page);
        Some(self.issue())
    }

    /// Moves one page forward.
    pub fn next_page(&mut self) -> Option<FetchTicket<D::Filters>> {
        self.set_page(self.current_page.saturating_add(1))
    }

    /// Moves one page back.
    pub fn prev_page(&mut self) -> Option<FetchTicket<D::Filters>> {
        self.set_page(self.current_page.saturating_sub(1))
    }

    /// Restores the domain defaults, drops any pending debounce and fetches.
    pub fn reset(&mut self) -> FetchTicket<D::Filters> {
        self.debouncer.cancel();
        self.filters = self.domain.defaults(self.page_size);
        self.issue()
    }

    /// Feeds back a fetch outcome. Returns `false` when the outcome belongs
    /// to a superseded request and was discarded.
    pub fn complete(&mut self, seq: u64, outcome: Result<SearchPage<D::Item>, String>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(
                page = self.domain.name(),
                seq,
                latest = self.latest_seq,
                "discarding stale search response"
            );
            return false;
        }
        match outcome {
            Ok(page) => {
                tracing::debug!(
                    page = self.domain.name(),
                    seq,
                    total = page.total,
                    items = page.items.len(),
                    "search completed"
                );
                self.results = page.items;
                self.total = page.total;
                self.current_page = page.page.max(1);
                if page.page_size > 0 {
                    self.page_size = page.page_size;
                }
                self.status = PageStatus::Idle;
            }
            Err(message) => {
                tracing::debug!(page = self.domain.name(), seq, %message, "search failed");
                self.status = PageStatus::Error(message);
            }
        }
        true
    }

    fn issue(&mut self) -> FetchTicket<D::Filters> {
        self.latest_seq = self.latest_seq.wrapping_add(1);
        self.status = PageStatus::Loading;
        tracing::debug!(
            page = self.domain.name(),
            seq = self.latest_seq,
            "search issued"
        );
        self.last_issued = Some(self.filters.clone());
        FetchTicket {
            seq: self.latest_seq,
            filters: self.filters.clone(),
        }
    }
}
