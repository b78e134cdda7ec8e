#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub, unused)]

//! Catalog and favorites state engine.
//!
//! Layout: `favorites/` (persisted id set and its codec), `query.rs`
//! (single-flight browse query state), `browse.rs` (cursor paginator),
//! `favorites_view.rs` (client-side filtering and slicing), `sync.rs`
//! (indicator propagation), `debounce.rs` + `router.rs` (search input),
//! `card.rs` (card view models), `engine.rs` (the `CatalogEngine` facade).

pub mod browse;
pub mod card;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod favorites;
pub mod favorites_view;
pub mod query;
pub mod router;
pub mod sync;

pub use browse::{BrowseOutcome, BrowsePaginator};
pub use card::{CardView, PLACEHOLDER_IMAGE, rating_label, star_rating};
pub use config::{ConfigError, ConfigResult, EngineConfig, FAVORITES_KEY};
pub use debounce::Debouncer;
pub use engine::{CatalogEngine, Collaborators, EngineSnapshot};
pub use favorites::{FavoritesListener, FavoritesStore, ToggleOutcome};
pub use favorites_view::{FavoritesCriteria, FavoritesPaginator, filter_favorites, sort_favorites};
pub use gamedeck_events::ViewMode;
pub use query::{Completion, FetchDecision, QueryState};
pub use router::{InputRouter, SearchTarget, spawn_input_router};
pub use sync::SyncBridge;
