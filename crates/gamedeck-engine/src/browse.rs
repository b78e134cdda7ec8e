//! Cursor-based browse paginator layered on [`QueryState`].

use gamedeck_catalog::{CatalogError, CatalogPage, GameSummary, QuerySpec};
use gamedeck_events::PaginationView;

use crate::query::{Completion, FetchDecision, QueryState};

/// Result of absorbing a catalog response.
#[derive(Debug)]
pub enum BrowseOutcome {
    /// A fresh page replaced the visible results.
    Published,
    /// The request for the visible state failed.
    Failed(CatalogError),
    /// A stale response was dropped; issue this request next.
    FollowUp(QuerySpec),
}

/// Browse results plus the query state that produced them.
#[derive(Debug, Clone)]
pub struct BrowsePaginator {
    query: QueryState,
    games: Vec<GameSummary>,
    count: u64,
}

impl BrowsePaginator {
    /// Empty paginator requesting `page_size` games per page.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            query: QueryState::new(page_size),
            games: Vec::new(),
            count: 0,
        }
    }

    /// Underlying query state.
    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    /// Mutable query state for filter and page changes.
    pub const fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    /// Games on the visible page.
    #[must_use]
    pub fn games(&self) -> &[GameSummary] {
        &self.games
    }

    /// Total matches reported with the visible page.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Advance one page; a no-op without a next cursor or while busy.
    pub fn next(&mut self) -> FetchDecision {
        if !self.query.has_next() || self.query.is_busy() {
            return FetchDecision::Ignored;
        }
        let page = self.query.page().saturating_add(1);
        self.query.set_page(page)
    }

    /// Go back one page; a no-op on page 1 or while busy.
    pub fn prev(&mut self) -> FetchDecision {
        if self.query.page() <= 1 || self.query.is_busy() {
            return FetchDecision::Ignored;
        }
        let page = self.query.page() - 1;
        self.query.set_page(page)
    }

    /// Absorb the in-flight response.
    pub fn complete(&mut self, result: Result<CatalogPage, CatalogError>) -> BrowseOutcome {
        match self.query.complete(result) {
            Completion::Fresh(page) => {
                self.games = page.results;
                self.count = page.count;
                BrowseOutcome::Published
            }
            Completion::Failed(err) => BrowseOutcome::Failed(err),
            Completion::Superseded(spec) => BrowseOutcome::FollowUp(spec),
        }
    }

    /// Pagination controls for the visible page. Hidden for a single page of
    /// results and for an empty page.
    #[must_use]
    pub fn view(&self) -> PaginationView {
        let page = self.query.page();
        let has_next = self.query.has_next();
        let single_page = page == 1 && !has_next;
        PaginationView {
            visible: !single_page && !self.games.is_empty(),
            page,
            total_pages: None,
            can_prev: page > 1,
            can_next: has_next,
            label: format!("Page {page}"),
        }
    }
}
