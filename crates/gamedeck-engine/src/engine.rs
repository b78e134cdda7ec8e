//! `CatalogEngine`: the state-context object behind every view.
//!
//! All mutable state lives in one [`EngineState`] guarded by a synchronous
//! mutex that is only held between suspension points. Collaborator calls run
//! with the lock released, so a slow request never blocks state-only
//! operations such as toggling a favorite or paging through favorites.
//!
//! The engine registers a listener on its [`FavoritesStore`]. Every persisted
//! change is queued by that listener and applied to the sync bridge and the
//! favorites paginator by whichever operation caused it.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use gamedeck_catalog::{
    CatalogClient, CatalogResult, DetailClient, FilterPatch, FilterState, GameDetail, GameId,
    GameSummary, MetadataClient, NamedRef, Ordering, PersistencePort, QuerySpec,
};
use gamedeck_events::{
    EngineEvent, EventBus, EventStream, Indicator, NotificationLevel, PaginationView, Surface,
    ViewMode,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::browse::{BrowseOutcome, BrowsePaginator};
use crate::card::CardView;
use crate::config::{ConfigResult, EngineConfig};
use crate::favorites::{FavoritesStore, ToggleOutcome};
use crate::favorites_view::{FavoritesCriteria, FavoritesPaginator};
use crate::query::FetchDecision;
use crate::sync::SyncBridge;

const ADDED_MESSAGE: &str = "Game added to favorites";
const REMOVED_MESSAGE: &str = "Game removed from favorites";
const CLEARED_MESSAGE: &str = "All favorites removed";
const BROWSE_FAILED_MESSAGE: &str = "Error loading games";

/// Remote and local collaborators consumed by the engine.
#[derive(Clone)]
pub struct Collaborators {
    /// Paginated catalog search.
    pub catalog: Arc<dyn CatalogClient>,
    /// Per-game detail lookups.
    pub details: Arc<dyn DetailClient>,
    /// Filter option lookups.
    pub metadata: Arc<dyn MetadataClient>,
    /// Durable storage for the favorite set.
    pub persistence: Arc<dyn PersistencePort>,
}

impl Collaborators {
    /// Use one client for every remote collaborator.
    #[must_use]
    pub fn from_client<C>(client: &Arc<C>, persistence: Arc<dyn PersistencePort>) -> Self
    where
        C: CatalogClient + DetailClient + MetadataClient + 'static,
    {
        Self {
            catalog: Arc::clone(client) as Arc<dyn CatalogClient>,
            details: Arc::clone(client) as Arc<dyn DetailClient>,
            metadata: Arc::clone(client) as Arc<dyn MetadataClient>,
            persistence,
        }
    }
}

/// Point-in-time view of the engine for renderers and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    /// Active view.
    pub view: ViewMode,
    /// Filters of the active view.
    pub filter: FilterState,
    /// Browse request that produced the visible page.
    pub request: QuerySpec,
    /// Whether a request or materialization is in flight.
    pub loading: bool,
    /// Error banner text.
    pub error: Option<String>,
    /// Visible browse page.
    pub browse: Vec<GameSummary>,
    /// Browse pagination controls.
    pub browse_pagination: PaginationView,
    /// Visible favorites slice.
    pub favorites: Vec<GameDetail>,
    /// Favorites pagination controls.
    pub favorites_pagination: PaginationView,
    /// Open detail view, if any.
    pub detail: Option<GameId>,
}

struct EngineState {
    view: ViewMode,
    browse: BrowsePaginator,
    favorites: FavoritesPaginator,
    favorites_filter: FilterState,
    sync: SyncBridge,
    platforms: Vec<NamedRef>,
    genres: Vec<NamedRef>,
    materializing: bool,
    detail: Option<GameId>,
    error: Option<String>,
    loading: bool,
}

impl EngineState {
    fn new(config: &EngineConfig) -> Self {
        Self {
            view: ViewMode::Home,
            browse: BrowsePaginator::new(config.browse_page_size),
            favorites: FavoritesPaginator::new(config.favorites_page_size),
            favorites_filter: FilterState::default(),
            sync: SyncBridge::new(),
            platforms: Vec::new(),
            genres: Vec::new(),
            materializing: false,
            detail: None,
            error: None,
            loading: false,
        }
    }

    fn is_loading(&self) -> bool {
        self.browse.query().is_busy() || self.materializing
    }

    fn sync_loading(&mut self, events: &mut Vec<EngineEvent>) {
        let loading = self.is_loading();
        if loading != self.loading {
            self.loading = loading;
            events.push(EngineEvent::LoadingChanged { loading });
        }
    }

    fn set_error(&mut self, error: Option<String>, events: &mut Vec<EngineEvent>) {
        if self.error != error {
            self.error.clone_from(&error);
            events.push(EngineEvent::ErrorChanged { error });
        }
    }

    fn active_filter(&self) -> FilterState {
        match self.view {
            ViewMode::Home => self.browse.query().filter().clone(),
            ViewMode::Favorites => self.favorites_filter.clone(),
        }
    }

    fn browse_results(&self) -> EngineEvent {
        EngineEvent::BrowseResults {
            games: self.browse.games().to_vec(),
            count: self.browse.count(),
            pagination: self.browse.view(),
        }
    }

    fn publish_browse(&mut self, events: &mut Vec<EngineEvent>) {
        self.sync.set_rendered(
            Surface::Browse,
            self.browse.games().iter().map(|game| game.id),
        );
        events.push(self.browse_results());
    }

    fn publish_favorites(&mut self, events: &mut Vec<EngineEvent>) {
        let slice = self.favorites.current_slice();
        self.sync
            .set_rendered(Surface::Favorites, slice.iter().map(GameDetail::id));
        events.push(EngineEvent::FavoritesResults {
            games: slice.to_vec(),
            total: self.favorites.filtered().len(),
            pagination: self.favorites.view(),
        });
    }

    /// Favorites match platform and genre by name; selections hold option ids.
    fn favorites_criteria(&self) -> FavoritesCriteria {
        FavoritesCriteria {
            search: self.favorites_filter.search.clone(),
            platform: self
                .favorites_filter
                .platform_id
                .as_deref()
                .map(|selected| option_name(&self.platforms, selected)),
            genre: self
                .favorites_filter
                .genre_id
                .as_deref()
                .map(|selected| option_name(&self.genres, selected)),
        }
    }

    /// Propagate one persisted favorites change to every rendered surface.
    /// Returns the id when the favorites view needs its detail fetched.
    fn apply_favorite_change(
        &mut self,
        change: &ToggleOutcome,
        events: &mut Vec<EngineEvent>,
    ) -> Option<GameId> {
        let updates = self.sync.updates_for(change);
        if !updates.is_empty() {
            events.push(EngineEvent::IndicatorsChanged { updates });
        }
        if change.now_favorite {
            return (self.view == ViewMode::Favorites && !self.materializing).then_some(change.id);
        }
        if self.favorites.remove(change.id) && self.view == ViewMode::Favorites {
            self.publish_favorites(events);
        }
        None
    }

    fn apply_favorites_patch(&mut self, patch: &FilterPatch) -> bool {
        let criteria_patch = FilterPatch {
            ordering: None,
            ..patch.clone()
        };
        let mut changed = false;
        if self.favorites_filter.apply(&criteria_patch) {
            let criteria = self.favorites_criteria();
            self.favorites.refilter(criteria);
            changed = true;
        }
        if let Some(ordering) = patch.ordering {
            self.favorites_filter.ordering = ordering;
            self.favorites.sort(ordering);
            changed = true;
        }
        changed
    }
}

fn option_name(options: &[NamedRef], selected: &str) -> String {
    options
        .iter()
        .find(|option| option.id.to_string() == selected)
        .map_or_else(|| selected.to_string(), |option| option.name.clone())
}

/// Catalog and favorites state engine.
pub struct CatalogEngine {
    catalog: Arc<dyn CatalogClient>,
    details: Arc<dyn DetailClient>,
    metadata: Arc<dyn MetadataClient>,
    favorites: FavoritesStore,
    changes: Arc<Mutex<Vec<ToggleOutcome>>>,
    events: EventBus,
    config: EngineConfig,
    state: Mutex<EngineState>,
}

impl CatalogEngine {
    /// Build an engine from its collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error when `config` fails validation.
    pub fn new(collaborators: Collaborators, config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        let favorites =
            FavoritesStore::new(collaborators.persistence, config.favorites_key.clone());
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        favorites.subscribe(Box::new(move |outcome: &ToggleOutcome| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(*outcome);
        }));
        Ok(Self {
            catalog: collaborators.catalog,
            details: collaborators.details,
            metadata: collaborators.metadata,
            favorites,
            changes,
            events: EventBus::new(),
            state: Mutex::new(EngineState::new(&config)),
            config,
        })
    }

    /// Subscribe to engine events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> EventStream {
        self.events.subscribe()
    }

    /// The favorites store.
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn take_favorite_changes(&self) -> Vec<ToggleOutcome> {
        std::mem::take(&mut *self.changes.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut EngineState, &mut Vec<EngineEvent>) -> R) -> R {
        let mut events = Vec::new();
        let result = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let result = f(&mut state, &mut events);
            state.sync_loading(&mut events);
            result
        };
        for event in events {
            self.events.publish(event);
        }
        result
    }

    /// Load filter options and the first browse page.
    pub async fn initialize(&self) {
        self.load_filter_options().await;
        let decision = self.with_state(|state, events| {
            events.push(EngineEvent::ViewChanged { view: state.view });
            if state.browse.query().is_loaded() {
                FetchDecision::Ignored
            } else {
                state.browse.query_mut().reload()
            }
        });
        self.run_fetch(decision).await;
    }

    /// Merge a filter change into the active view. Browse refetches from page
    /// 1; favorites refilter in memory.
    pub async fn set_filter(&self, patch: FilterPatch) {
        let decision = self.with_state(|state, events| match state.view {
            ViewMode::Home => {
                let decision = state.browse.query_mut().set_filter(&patch);
                if decision != FetchDecision::Ignored {
                    events.push(EngineEvent::FilterChanged {
                        filter: state.browse.query().filter().clone(),
                    });
                }
                decision
            }
            ViewMode::Favorites => {
                if state.apply_favorites_patch(&patch) {
                    events.push(EngineEvent::FilterChanged {
                        filter: state.favorites_filter.clone(),
                    });
                    state.publish_favorites(events);
                }
                FetchDecision::Ignored
            }
        });
        self.run_fetch(decision).await;
    }

    /// Route a settled search value to the active view.
    pub async fn search_input(&self, value: String) {
        self.set_filter(FilterPatch::search(value)).await;
    }

    /// Change the sort order of the active view.
    pub async fn sort(&self, ordering: Ordering) {
        self.set_filter(FilterPatch::ordering(ordering)).await;
    }

    /// Jump to `page` in the active view.
    pub async fn set_page(&self, page: u32) {
        let decision = self.with_state(|state, events| match state.view {
            ViewMode::Home => state.browse.query_mut().set_page(page),
            ViewMode::Favorites => {
                if state.favorites.set_page(page) {
                    state.publish_favorites(events);
                }
                FetchDecision::Ignored
            }
        });
        self.run_fetch(decision).await;
    }

    /// Advance one page in the active view.
    pub async fn next_page(&self) {
        let decision = self.with_state(|state, events| match state.view {
            ViewMode::Home => state.browse.next(),
            ViewMode::Favorites => {
                if state.favorites.next() {
                    state.publish_favorites(events);
                }
                FetchDecision::Ignored
            }
        });
        self.run_fetch(decision).await;
    }

    /// Go back one page in the active view.
    pub async fn prev_page(&self) {
        let decision = self.with_state(|state, events| match state.view {
            ViewMode::Home => state.browse.prev(),
            ViewMode::Favorites => {
                if state.favorites.prev() {
                    state.publish_favorites(events);
                }
                FetchDecision::Ignored
            }
        });
        self.run_fetch(decision).await;
    }

    /// Re-issue the last browse request.
    pub async fn retry(&self) {
        let decision = self.with_state(|state, _| state.browse.query_mut().reload());
        self.run_fetch(decision).await;
    }

    /// Dismiss the error banner.
    pub fn dismiss_error(&self) {
        self.with_state(|state, events| state.set_error(None, events));
    }

    /// Switch views. Entering favorites re-materializes them; entering home
    /// fetches only when no page has been loaded yet.
    pub async fn enter_view(&self, view: ViewMode) {
        let decision = self.with_state(|state, events| {
            state.view = view;
            events.push(EngineEvent::ViewChanged { view });
            events.push(EngineEvent::FilterChanged {
                filter: state.active_filter(),
            });
            match view {
                ViewMode::Home if state.browse.query().is_loaded() => {
                    state.publish_browse(events);
                    FetchDecision::Ignored
                }
                ViewMode::Home => state.browse.query_mut().reload(),
                ViewMode::Favorites => FetchDecision::Ignored,
            }
        });
        match view {
            ViewMode::Home => self.run_fetch(decision).await,
            ViewMode::Favorites => self.materialize_favorites().await,
        }
    }

    /// Flip favorite membership of `id` and update every rendered card.
    pub async fn toggle_favorite(&self, id: GameId) -> ToggleOutcome {
        let outcome = self.favorites.toggle(id);
        if !outcome.changed {
            return outcome;
        }

        let changes = self.take_favorite_changes();
        let additions: Vec<GameId> = self.with_state(|state, events| {
            let (level, message) = if outcome.now_favorite {
                (NotificationLevel::Success, ADDED_MESSAGE)
            } else {
                (NotificationLevel::Warning, REMOVED_MESSAGE)
            };
            events.push(EngineEvent::Notification {
                level,
                message: message.to_string(),
            });
            changes
                .iter()
                .filter_map(|change| state.apply_favorite_change(change, events))
                .collect()
        });

        for added in additions {
            self.materialize_one(added).await;
        }
        outcome
    }

    /// Remove every favorite and update every rendered card. Returns one
    /// outcome per removed id; empty when nothing was stored or the write
    /// failed.
    pub fn clear_favorites(&self) -> Vec<ToggleOutcome> {
        let outcomes = self.favorites.clear();
        if outcomes.is_empty() {
            return outcomes;
        }
        let changes = self.take_favorite_changes();
        self.with_state(|state, events| {
            events.push(EngineEvent::Notification {
                level: NotificationLevel::Warning,
                message: CLEARED_MESSAGE.to_string(),
            });
            for change in &changes {
                // Removals never need a fetch.
                let _ = state.apply_favorite_change(change, events);
            }
        });
        outcomes
    }

    async fn materialize_one(&self, id: GameId) {
        let detail = match self.details.game(id).await {
            Ok(detail) => detail,
            Err(err) => {
                warn!(game_id = %id, error = %err, "failed to load new favorite");
                return;
            }
        };
        let still_favorite = self.favorites.is_favorite(id);
        self.with_state(|state, events| {
            if still_favorite
                && state.view == ViewMode::Favorites
                && !state.materializing
                && state.favorites.insert(detail)
            {
                state.publish_favorites(events);
            }
        });
    }

    async fn materialize_favorites(&self) {
        let started = self.with_state(|state, events| {
            if state.materializing {
                return false;
            }
            state.materializing = true;
            state.favorites_filter = FilterState::default();
            state.favorites.reset();
            events.push(EngineEvent::FilterChanged {
                filter: state.favorites_filter.clone(),
            });
            true
        });
        if !started {
            debug!("favorites materialization already running");
            return;
        }

        let mut attempted = HashSet::new();
        let mut loaded = HashMap::new();
        loop {
            let pending: Vec<GameId> = self
                .favorites
                .list()
                .into_iter()
                .filter(|id| !attempted.contains(id))
                .collect();
            if pending.is_empty() {
                break;
            }
            for id in pending {
                attempted.insert(id);
                match self.details.game(id).await {
                    Ok(detail) => {
                        loaded.insert(id, detail);
                    }
                    Err(err) => {
                        warn!(game_id = %id, error = %err, "skipping favorite that failed to load");
                    }
                }
            }
        }

        let games: Vec<GameDetail> = self
            .favorites
            .list()
            .into_iter()
            .filter_map(|id| loaded.remove(&id))
            .collect();
        info!(count = games.len(), "favorites materialized");
        self.with_state(|state, events| {
            state.materializing = false;
            // Filters and sort applied while loading carry over.
            state.favorites.load(games);
            state.publish_favorites(events);
        });
    }

    /// Open the detail view for `id`. Screenshots degrade to an empty list;
    /// a failed lookup is published as an inline error.
    ///
    /// # Errors
    ///
    /// Returns the detail client's error when the game cannot be loaded.
    pub async fn open_detail(&self, id: GameId) -> CatalogResult<GameDetail> {
        let (detail, screenshots) =
            tokio::join!(self.details.game(id), self.details.screenshots(id));
        match detail {
            Ok(detail) => {
                let favorite = Indicator::for_membership(self.favorites.is_favorite(id));
                self.with_state(|state, events| {
                    state.detail = Some(id);
                    state.sync.set_rendered(Surface::Detail, [id]);
                    events.push(EngineEvent::DetailOpened {
                        detail: detail.clone(),
                        screenshots,
                        favorite,
                    });
                });
                Ok(detail)
            }
            Err(err) => {
                error!(game_id = %id, error = %err, "failed to load game detail");
                self.with_state(|state, events| {
                    state.detail = None;
                    state.sync.clear(Surface::Detail);
                    events.push(EngineEvent::DetailFailed {
                        id,
                        message: err.to_string(),
                    });
                });
                Err(err)
            }
        }
    }

    /// Close the detail view.
    pub fn close_detail(&self) {
        self.with_state(|state, events| {
            state.detail = None;
            state.sync.clear(Surface::Detail);
            events.push(EngineEvent::DetailClosed);
        });
    }

    /// Fetch platform and genre options. Failures leave the lists empty.
    pub async fn load_filter_options(&self) {
        let (platforms, genres) = tokio::join!(self.metadata.platforms(), self.metadata.genres());
        let mut platforms = platforms.unwrap_or_else(|err| {
            warn!(error = %err, "failed to load platform options");
            Vec::new()
        });
        let mut genres = genres.unwrap_or_else(|err| {
            warn!(error = %err, "failed to load genre options");
            Vec::new()
        });
        platforms.truncate(self.config.platform_option_cap);
        genres.truncate(self.config.genre_option_cap);
        self.with_state(|state, events| {
            state.platforms.clone_from(&platforms);
            state.genres.clone_from(&genres);
            events.push(EngineEvent::FilterOptionsLoaded { platforms, genres });
        });
    }

    async fn run_fetch(&self, decision: FetchDecision) {
        let FetchDecision::Start(mut spec) = decision else {
            return;
        };
        loop {
            debug!(
                search = ?spec.search,
                platforms = ?spec.platforms,
                genres = ?spec.genres,
                ordering = %spec.ordering,
                page = spec.page,
                "querying catalog"
            );
            let result = self.catalog.query(&spec).await;
            if let Err(err) = &result {
                error!(error = %err, page = spec.page, "catalog query failed");
            }
            let follow_up = self.with_state(|state, events| match state.browse.complete(result) {
                BrowseOutcome::Published => {
                    state.publish_browse(events);
                    state.set_error(None, events);
                    None
                }
                BrowseOutcome::Failed(err) => {
                    state.set_error(Some(format!("Could not load games: {err}")), events);
                    events.push(EngineEvent::Notification {
                        level: NotificationLevel::Error,
                        message: BROWSE_FAILED_MESSAGE.to_string(),
                    });
                    None
                }
                BrowseOutcome::FollowUp(next) => {
                    debug!(page = next.page, "discarding stale catalog response");
                    Some(next)
                }
            });
            match follow_up {
                Some(next) => spec = next,
                None => break,
            }
        }
    }

    /// Active view.
    #[must_use]
    pub fn view(&self) -> ViewMode {
        self.with_state(|state, _| state.view)
    }

    /// Browse request spec for the current state.
    #[must_use]
    pub fn current_request_spec(&self) -> QuerySpec {
        self.with_state(|state, _| state.browse.query().current_request_spec())
    }

    /// Loaded platform and genre options.
    #[must_use]
    pub fn filter_options(&self) -> (Vec<NamedRef>, Vec<NamedRef>) {
        self.with_state(|state, _| (state.platforms.clone(), state.genres.clone()))
    }

    /// Card models for the visible browse page.
    #[must_use]
    pub fn browse_cards(&self) -> Vec<CardView> {
        let favorites: HashSet<GameId> = self.favorites.list().into_iter().collect();
        self.with_state(|state, _| {
            state
                .browse
                .games()
                .iter()
                .map(|game| CardView::from_summary(game, favorites.contains(&game.id)))
                .collect()
        })
    }

    /// Card models for the visible favorites slice.
    #[must_use]
    pub fn favorite_cards(&self) -> Vec<CardView> {
        self.with_state(|state, _| {
            state
                .favorites
                .current_slice()
                .iter()
                .map(|game| CardView::from_summary(&game.summary, true))
                .collect()
        })
    }

    /// Everything a renderer needs right now.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        self.with_state(|state, _| EngineSnapshot {
            view: state.view,
            filter: state.active_filter(),
            request: state.browse.query().current_request_spec(),
            loading: state.is_loading(),
            error: state.error.clone(),
            browse: state.browse.games().to_vec(),
            browse_pagination: state.browse.view(),
            favorites: state.favorites.current_slice().to_vec(),
            favorites_pagination: state.favorites.view(),
            detail: state.detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedeck_test_support::{FakeCatalog, MemoryStore, fixtures};

    fn engine_with(catalog: &Arc<FakeCatalog>, store: Arc<MemoryStore>) -> CatalogEngine {
        CatalogEngine::new(
            Collaborators::from_client(catalog, store),
            EngineConfig::default(),
        )
        .expect("valid config")
    }

    #[test]
    fn option_name_falls_back_to_raw_selection() {
        let options = vec![NamedRef::new(4, "PC"), NamedRef::new(187, "PlayStation 5")];
        assert_eq!(option_name(&options, "187"), "PlayStation 5");
        assert_eq!(option_name(&options, "Xbox"), "Xbox");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let catalog = Arc::new(FakeCatalog::new());
        let config = EngineConfig {
            browse_page_size: 0,
            ..EngineConfig::default()
        };
        let result = CatalogEngine::new(
            Collaborators::from_client(&catalog, Arc::new(MemoryStore::new())),
            config,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn favorites_filter_resolves_option_ids_to_names() {
        let catalog = Arc::new(FakeCatalog::new());
        catalog.set_metadata(
            vec![NamedRef::new(4, "PC"), NamedRef::new(7, "Nintendo Switch")],
            vec![NamedRef::new(5, "RPG")],
        );
        catalog.insert_detail(fixtures::detail(1, "Hades", &["PC"], &["Action"], Some(4.5)));
        catalog.insert_detail(fixtures::detail(2, "Zelda", &["Nintendo Switch"], &["Adventure"], None));
        let store = Arc::new(MemoryStore::with_value("favorites", r#"["1","2"]"#));
        let engine = engine_with(&catalog, store);

        engine.load_filter_options().await;
        engine.enter_view(ViewMode::Favorites).await;
        engine
            .set_filter(FilterPatch::default().with_platform("7"))
            .await;

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.favorites.len(), 1);
        assert_eq!(snapshot.favorites[0].id(), GameId(2));
        assert_eq!(snapshot.filter.platform_id.as_deref(), Some("7"));
        assert!(catalog.query_calls().is_empty());
    }

    #[tokio::test]
    async fn filter_options_are_capped() {
        let catalog = Arc::new(FakeCatalog::new());
        let platforms = (1..=60).map(|id| NamedRef::new(id, format!("P{id}"))).collect();
        let genres = (1..=20).map(|id| NamedRef::new(id, format!("G{id}"))).collect();
        catalog.set_metadata(platforms, genres);
        let engine = engine_with(&catalog, Arc::new(MemoryStore::new()));

        engine.load_filter_options().await;
        let (platforms, genres) = engine.filter_options();
        assert_eq!(platforms.len(), 50);
        assert_eq!(genres.len(), 15);
    }

    #[tokio::test]
    async fn failed_filter_options_leave_lists_empty() {
        let catalog = Arc::new(FakeCatalog::new());
        catalog.fail_metadata();
        let engine = engine_with(&catalog, Arc::new(MemoryStore::new()));
        let mut events = engine.subscribe();

        engine.load_filter_options().await;
        let (platforms, genres) = engine.filter_options();
        assert!(platforms.is_empty() && genres.is_empty());
        assert!(events.drain().iter().any(|event| matches!(
            event,
            EngineEvent::FilterOptionsLoaded { platforms, .. } if platforms.is_empty()
        )));
    }
}
