//! Browse query state with single-flight request serialization.
//!
//! At most one catalog request is in flight. Filter or page changes that
//! arrive meanwhile update the state and mark it stale; when the outstanding
//! response lands it is discarded and exactly one follow-up request for the
//! latest state is issued. An older response can therefore never overwrite a
//! newer page.

use gamedeck_catalog::{CatalogError, CatalogPage, FilterPatch, FilterState, QuerySpec};

/// What the caller should do after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchDecision {
    /// Issue a request for this spec now.
    Start(QuerySpec),
    /// A request is in flight; the change will be fetched when it resolves.
    Deferred,
    /// Nothing changed.
    Ignored,
}

/// How an in-flight response was absorbed.
#[derive(Debug)]
pub enum Completion {
    /// The response matches the current state and should be published.
    Fresh(CatalogPage),
    /// The request failed for the current state.
    Failed(CatalogError),
    /// The state moved on while the request was in flight; the response was
    /// dropped and this follow-up must be issued.
    Superseded(QuerySpec),
}

/// Filter, page and busy state for the browse view.
#[derive(Debug, Clone)]
pub struct QueryState {
    filter: FilterState,
    page: u32,
    page_size: u32,
    has_next: bool,
    busy: bool,
    stale: bool,
    loaded: bool,
}

impl QueryState {
    /// Fresh state on page 1 with default filters.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: FilterState::default(),
            page: 1,
            page_size: page_size.max(1),
            has_next: false,
            busy: false,
            stale: false,
            loaded: false,
        }
    }

    /// Current filters.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Current one-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Whether the last fresh response carried a next cursor.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether any page has been published yet.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Request spec for the current state.
    #[must_use]
    pub fn current_request_spec(&self) -> QuerySpec {
        QuerySpec::from_filter(&self.filter, self.page, self.page_size)
    }

    /// Merge a partial filter update and jump back to page 1.
    pub fn set_filter(&mut self, patch: &FilterPatch) -> FetchDecision {
        if !self.filter.apply(patch) {
            return FetchDecision::Ignored;
        }
        self.page = 1;
        self.request()
    }

    /// Move to page `page` (clamped to at least 1) keeping filters.
    pub fn set_page(&mut self, page: u32) -> FetchDecision {
        self.page = page.max(1);
        self.request()
    }

    /// Re-issue the current spec, used for the first load and for retry.
    /// Ignored while busy since the outstanding request already covers it.
    pub fn reload(&mut self) -> FetchDecision {
        if self.busy {
            return FetchDecision::Ignored;
        }
        self.request()
    }

    /// Absorb the response of the in-flight request.
    pub fn complete(&mut self, result: Result<CatalogPage, CatalogError>) -> Completion {
        if self.stale {
            self.stale = false;
            return Completion::Superseded(self.current_request_spec());
        }
        self.busy = false;
        match result {
            Ok(page) => {
                self.has_next = page.has_next();
                self.loaded = true;
                Completion::Fresh(page)
            }
            Err(err) => Completion::Failed(err),
        }
    }

    fn request(&mut self) -> FetchDecision {
        if self.busy {
            self.stale = true;
            return FetchDecision::Deferred;
        }
        self.busy = true;
        FetchDecision::Start(self.current_request_spec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedeck_catalog::Ordering;
    use gamedeck_test_support::fixtures;

    fn started(decision: FetchDecision) -> QuerySpec {
        match decision {
            FetchDecision::Start(spec) => spec,
            other => panic!("expected a request, got {other:?}"),
        }
    }

    #[test]
    fn filter_change_resets_page_and_starts_request() {
        let mut state = QueryState::new(20);
        started(state.set_page(3));
        assert!(matches!(
            state.complete(Ok(fixtures::page(fixtures::numbered(1, 20), true))),
            Completion::Fresh(_)
        ));

        let spec = started(state.set_filter(&FilterPatch::search("zelda")));
        assert_eq!(spec.page, 1);
        assert_eq!(spec.search.as_deref(), Some("zelda"));
        assert_eq!(spec.page_size, 20);
    }

    #[test]
    fn unchanged_filter_is_ignored() {
        let mut state = QueryState::new(20);
        assert_eq!(
            state.set_filter(&FilterPatch::ordering(Ordering::RATING_DESC)),
            FetchDecision::Ignored
        );
        assert!(!state.is_busy());
    }

    #[test]
    fn changes_while_busy_are_deferred_and_followed_up_once() {
        let mut state = QueryState::new(20);
        started(state.reload());
        assert_eq!(state.set_page(2), FetchDecision::Deferred);
        assert_eq!(
            state.set_filter(&FilterPatch::search("mario")),
            FetchDecision::Deferred
        );

        let follow_up = match state.complete(Ok(fixtures::page(fixtures::numbered(1, 20), true))) {
            Completion::Superseded(spec) => spec,
            other => panic!("stale response must be superseded, got {other:?}"),
        };
        assert_eq!(follow_up.search.as_deref(), Some("mario"));
        assert_eq!(follow_up.page, 1);
        assert!(state.is_busy());
        assert!(!state.is_loaded());

        assert!(matches!(
            state.complete(Ok(fixtures::page(fixtures::numbered(1, 3), false))),
            Completion::Fresh(_)
        ));
        assert!(!state.is_busy());
        assert!(!state.has_next());
    }

    #[test]
    fn failure_frees_the_slot_for_a_retry() {
        let mut state = QueryState::new(20);
        started(state.reload());
        assert!(matches!(
            state.complete(Err(CatalogError::status(502, "bad gateway"))),
            Completion::Failed(_)
        ));
        assert!(!state.is_busy());
        assert!(!state.is_loaded());

        let retry = started(state.reload());
        assert_eq!(retry, state.current_request_spec());
        assert!(matches!(
            state.complete(Ok(fixtures::page(Vec::new(), false))),
            Completion::Fresh(_)
        ));
        assert!(state.is_loaded());
    }

    #[test]
    fn reload_while_busy_is_ignored() {
        let mut state = QueryState::new(20);
        started(state.reload());
        assert_eq!(state.reload(), FetchDecision::Ignored);
        assert!(matches!(
            state.complete(Ok(fixtures::page(Vec::new(), false))),
            Completion::Fresh(_)
        ));
    }

    #[test]
    fn page_zero_clamps_to_one() {
        let mut state = QueryState::new(20);
        assert_eq!(started(state.set_page(0)).page, 1);
    }
}
