//! Client-side pagination and filtering over materialized favorites.

use std::cmp::Ordering as CmpOrdering;

use gamedeck_catalog::{GameDetail, GameId, GameSummary, Ordering, SortKey};
use gamedeck_events::PaginationView;

/// Filters applied to the favorites view. Platform and genre are matched by
/// exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesCriteria {
    /// Case-insensitive name substring; empty matches everything.
    pub search: String,
    /// Required platform name.
    pub platform: Option<String>,
    /// Required genre name.
    pub genre: Option<String>,
}

impl FavoritesCriteria {
    /// Whether no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.platform.is_none() && self.genre.is_none()
    }

    /// Whether `game` passes every configured predicate.
    #[must_use]
    pub fn matches(&self, game: &GameSummary) -> bool {
        let term = self.search.trim().to_lowercase();
        let name_ok = term.is_empty() || game.name.to_lowercase().contains(&term);
        let platform_ok = self
            .platform
            .as_deref()
            .is_none_or(|wanted| game.platform_names().any(|name| name == wanted));
        let genre_ok = self
            .genre
            .as_deref()
            .is_none_or(|wanted| game.genre_names().any(|name| name == wanted));
        name_ok && platform_ok && genre_ok
    }
}

/// Subset of `games` passing `criteria`, in input order.
#[must_use]
pub fn filter_favorites(games: &[GameDetail], criteria: &FavoritesCriteria) -> Vec<GameDetail> {
    games
        .iter()
        .filter(|game| criteria.matches(&game.summary))
        .cloned()
        .collect()
}

/// Sort favorites in memory. Name sorts ascending, rating descending with
/// unrated games last, release date newest first; other keys keep order.
pub fn sort_favorites(games: &mut [GameDetail], ordering: Ordering) {
    match ordering.key {
        SortKey::Name => games.sort_by(|a, b| {
            a.summary
                .name
                .to_lowercase()
                .cmp(&b.summary.name.to_lowercase())
        }),
        SortKey::Rating => games.sort_by(|a, b| {
            let left = a.summary.rating.unwrap_or(0.0);
            let right = b.summary.rating.unwrap_or(0.0);
            right.partial_cmp(&left).unwrap_or(CmpOrdering::Equal)
        }),
        SortKey::Released => games.sort_by(|a, b| b.summary.released.cmp(&a.summary.released)),
        _ => {}
    }
}

/// Favorites list with its own filter and page state.
#[derive(Debug, Clone)]
pub struct FavoritesPaginator {
    materialized: Vec<GameDetail>,
    filtered: Vec<GameDetail>,
    criteria: FavoritesCriteria,
    ordering: Option<Ordering>,
    page: u32,
    page_size: u32,
}

impl FavoritesPaginator {
    /// Empty paginator with `page_size` games per page.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            materialized: Vec::new(),
            filtered: Vec::new(),
            criteria: FavoritesCriteria::default(),
            ordering: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the materialized list, keeping the active criteria and sort.
    pub fn load(&mut self, games: Vec<GameDetail>) {
        self.materialized = games;
        self.recompute();
    }

    /// Drop criteria and sort and return to page 1.
    pub fn reset(&mut self) {
        self.criteria = FavoritesCriteria::default();
        self.ordering = None;
        self.recompute();
    }

    /// Recompute the filtered list for new criteria and return to page 1.
    pub fn refilter(&mut self, criteria: FavoritesCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Sort the filtered list; the order is kept across refilters.
    pub fn sort(&mut self, ordering: Ordering) {
        self.ordering = Some(ordering);
        sort_favorites(&mut self.filtered, ordering);
    }

    /// Current one-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Favorites passing the active criteria.
    #[must_use]
    pub fn filtered(&self) -> &[GameDetail] {
        &self.filtered
    }

    /// `ceil(filtered / page_size)`.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let len = u32::try_from(self.filtered.len()).unwrap_or(u32::MAX);
        len.div_ceil(self.page_size)
    }

    /// Games on the current page.
    #[must_use]
    pub fn current_slice(&self) -> &[GameDetail] {
        let size = self.page_size as usize;
        let start = (self.page as usize - 1).saturating_mul(size);
        if start >= self.filtered.len() {
            return &[];
        }
        let end = (start + size).min(self.filtered.len());
        &self.filtered[start..end]
    }

    /// Advance one page, clamped to the last page. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        self.set_page(self.page.saturating_add(1))
    }

    /// Go back one page, clamped to page 1. Returns whether it moved.
    pub fn prev(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Jump to `page`, clamped into `[1, max(total_pages, 1)]`.
    pub fn set_page(&mut self, page: u32) -> bool {
        let clamped = page.clamp(1, self.total_pages().max(1));
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }

    /// Whether `id` is materialized.
    #[must_use]
    pub fn contains(&self, id: GameId) -> bool {
        self.materialized.iter().any(|game| game.id() == id)
    }

    /// Drop `id` from both lists and clamp the page. Returns whether it was
    /// present.
    pub fn remove(&mut self, id: GameId) -> bool {
        let before = self.materialized.len();
        self.materialized.retain(|game| game.id() != id);
        self.filtered.retain(|game| game.id() != id);
        self.set_page(self.page);
        before != self.materialized.len()
    }

    /// Add a newly materialized favorite in id order, keeping the current
    /// page. A sorted view re-sorts.
    pub fn insert(&mut self, game: GameDetail) -> bool {
        let id = game.id();
        if self.contains(id) {
            return false;
        }
        if self.criteria.matches(&game.summary) {
            let at = self.filtered.partition_point(|existing| existing.id() < id);
            self.filtered.insert(at, game.clone());
            if let Some(ordering) = self.ordering {
                sort_favorites(&mut self.filtered, ordering);
            }
        }
        let at = self.materialized.partition_point(|existing| existing.id() < id);
        self.materialized.insert(at, game);
        true
    }

    /// Pagination controls: `Page p of n`, hidden when nothing matches.
    #[must_use]
    pub fn view(&self) -> PaginationView {
        let total = self.total_pages();
        PaginationView {
            visible: !self.filtered.is_empty(),
            page: self.page,
            total_pages: Some(total),
            can_prev: self.page > 1,
            can_next: self.page < total,
            label: format!("Page {} of {}", self.page, total.max(1)),
        }
    }

    fn recompute(&mut self) {
        self.filtered = filter_favorites(&self.materialized, &self.criteria);
        if let Some(ordering) = self.ordering {
            sort_favorites(&mut self.filtered, ordering);
        }
        self.page = 1;
    }
}
