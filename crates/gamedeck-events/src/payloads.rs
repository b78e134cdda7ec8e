//! Event payload types published by the engine.

use chrono::{DateTime, Utc};
use gamedeck_catalog::{FilterState, GameDetail, GameId, GameSummary, NamedRef, Screenshot};
use serde::{Deserialize, Serialize};

use crate::bus::EventId;

/// Which top-level view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Server-paginated catalog browsing.
    #[default]
    Home,
    /// Client-paginated favorites.
    Favorites,
}

/// Rendered surface that can show a favorite indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Card in the browse grid.
    Browse,
    /// Card in the favorites grid.
    Favorites,
    /// Open detail view.
    Detail,
}

/// Favorite indicator state for a single rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// Whether the game is currently a favorite.
    pub active: bool,
    /// Glyph shown on the toggle button.
    pub icon: String,
    /// Tooltip describing what the toggle will do.
    pub title: String,
}

impl Indicator {
    /// Indicator for the given membership.
    #[must_use]
    pub fn for_membership(active: bool) -> Self {
        if active {
            Self {
                active,
                icon: "\u{2764}\u{fe0f}".to_string(),
                title: "Remove from favorites".to_string(),
            }
        } else {
            Self {
                active,
                icon: "\u{1f90d}".to_string(),
                title: "Add to favorites".to_string(),
            }
        }
    }
}

/// Indicator change for one game on one surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorUpdate {
    /// Game whose indicator changed.
    pub id: GameId,
    /// Surface rendering the game.
    pub surface: Surface,
    /// New indicator state.
    pub indicator: Indicator,
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Positive confirmation.
    Success,
    /// Informational or reversible change.
    Warning,
    /// Failure the user should know about.
    Error,
}

/// Pagination controls derived for either view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationView {
    /// Whether the controls should be rendered at all.
    pub visible: bool,
    /// Current one-based page.
    pub page: u32,
    /// Total pages when known (favorites only).
    pub total_pages: Option<u32>,
    /// Whether the previous control is enabled.
    pub can_prev: bool,
    /// Whether the next control is enabled.
    pub can_next: bool,
    /// Page label such as `Page 2` or `Page 2 of 3`.
    pub label: String,
}

impl PaginationView {
    /// Controls for an empty or unloaded view.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            page: 1,
            total_pages: None,
            can_prev: false,
            can_next: false,
            label: "Page 1".to_string(),
        }
    }
}

/// Typed state changes emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A fresh browse page is ready.
    BrowseResults {
        /// Games on the current page.
        games: Vec<GameSummary>,
        /// Total matches reported by the catalog.
        count: u64,
        /// Pagination controls for the page.
        pagination: PaginationView,
    },
    /// The favorites slice changed.
    FavoritesResults {
        /// Games on the current slice.
        games: Vec<GameDetail>,
        /// Number of favorites passing the active filters.
        total: usize,
        /// Pagination controls for the slice.
        pagination: PaginationView,
    },
    /// A catalog or materialization request started or finished.
    LoadingChanged {
        /// Whether a request is in flight.
        loading: bool,
    },
    /// The error banner changed; `None` dismisses it.
    ErrorChanged {
        /// Banner text.
        error: Option<String>,
    },
    /// Transient notification.
    Notification {
        /// Severity.
        level: NotificationLevel,
        /// Message text.
        message: String,
    },
    /// Favorite indicators changed on rendered cards.
    IndicatorsChanged {
        /// One entry per surface rendering an affected game.
        updates: Vec<IndicatorUpdate>,
    },
    /// The active view switched.
    ViewChanged {
        /// New view.
        view: ViewMode,
    },
    /// A detail view opened.
    DetailOpened {
        /// Full record.
        detail: GameDetail,
        /// Screenshots, empty when unavailable.
        screenshots: Vec<Screenshot>,
        /// Favorite indicator for the detail toggle.
        favorite: Indicator,
    },
    /// A detail lookup failed; rendered inline in place of the detail view.
    DetailFailed {
        /// Requested game.
        id: GameId,
        /// Failure text.
        message: String,
    },
    /// The detail view closed.
    DetailClosed,
    /// Filters of the active view changed.
    FilterChanged {
        /// Current filter state.
        filter: FilterState,
    },
    /// Platform and genre options are available.
    FilterOptionsLoaded {
        /// Platform options.
        platforms: Vec<NamedRef>,
        /// Genre options.
        genres: Vec<NamedRef>,
    },
}

impl EngineEvent {
    /// Machine-friendly discriminator for subscribers and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BrowseResults { .. } => "browse_results",
            Self::FavoritesResults { .. } => "favorites_results",
            Self::LoadingChanged { .. } => "loading_changed",
            Self::ErrorChanged { .. } => "error_changed",
            Self::Notification { .. } => "notification",
            Self::IndicatorsChanged { .. } => "indicators_changed",
            Self::ViewChanged { .. } => "view_changed",
            Self::DetailOpened { .. } => "detail_opened",
            Self::DetailFailed { .. } => "detail_failed",
            Self::DetailClosed => "detail_closed",
            Self::FilterChanged { .. } => "filter_changed",
            Self::FilterOptionsLoaded { .. } => "filter_options_loaded",
        }
    }
}

/// Metadata wrapper around events. Each envelope tracks the event id and
/// emission timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Sequential identifier.
    pub id: EventId,
    /// Emission time.
    pub timestamp: DateTime<Utc>,
    /// Payload.
    pub event: EngineEvent,
}
