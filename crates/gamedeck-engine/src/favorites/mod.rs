//! Favorites store: the single owner of the persisted favorite id set.

pub mod codec;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use gamedeck_catalog::{GameId, PersistencePort};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    /// Toggled game.
    pub id: GameId,
    /// Membership after the call.
    pub now_favorite: bool,
    /// Whether the persisted set actually changed.
    pub changed: bool,
}

/// Callback invoked synchronously after every persisted change.
pub type FavoritesListener = Box<dyn Fn(&ToggleOutcome) + Send + Sync>;

/// Mediates every read and write of the favorite id set.
///
/// Mutations are serialized and listeners run before the mutating call
/// returns. Listeners must not call back into the store.
pub struct FavoritesStore {
    port: Arc<dyn PersistencePort>,
    key: String,
    listeners: Mutex<Vec<FavoritesListener>>,
    write_guard: Mutex<()>,
}

impl fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Build a store persisting under `key`.
    #[must_use]
    pub fn new(port: Arc<dyn PersistencePort>, key: impl Into<String>) -> Self {
        Self {
            port,
            key: key.into(),
            listeners: Mutex::new(Vec::new()),
            write_guard: Mutex::new(()),
        }
    }

    /// Favorite ids in ascending order. Unreadable or malformed storage reads
    /// as an empty set.
    #[must_use]
    pub fn list(&self) -> Vec<GameId> {
        let raw = match self.port.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, key = %self.key, "favorites storage unreadable; treating as empty");
                return Vec::new();
            }
        };
        match codec::decode(&raw) {
            Ok(ids) => ids,
            Err(err) => {
                warn!(error = %err, key = %self.key, "favorites storage corrupted; treating as empty");
                Vec::new()
            }
        }
    }

    /// Whether `id` is in the favorite set.
    #[must_use]
    pub fn is_favorite(&self, id: GameId) -> bool {
        self.list().contains(&id)
    }

    /// Number of favorites.
    #[must_use]
    pub fn count(&self) -> usize {
        self.list().len()
    }

    /// Flip membership of `id`, persist, then notify listeners.
    ///
    /// The stored form depends only on the set, so toggling twice restores
    /// the stored bytes. A failed write leaves the set untouched and reports
    /// `changed = false`.
    pub fn toggle(&self, id: GameId) -> ToggleOutcome {
        let _serial = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut ids = self.list();
        let was_favorite = ids.contains(&id);
        if was_favorite {
            ids.retain(|existing| *existing != id);
        } else {
            ids.push(id);
        }

        if let Err(err) = self.port.set(&self.key, &codec::encode(&ids)) {
            warn!(error = %err, game_id = %id, "failed to persist favorites; toggle ignored");
            return ToggleOutcome {
                id,
                now_favorite: was_favorite,
                changed: false,
            };
        }

        let outcome = ToggleOutcome {
            id,
            now_favorite: !was_favorite,
            changed: true,
        };
        debug!(game_id = %id, now_favorite = outcome.now_favorite, "favorite toggled");
        self.notify(&outcome);
        outcome
    }

    /// Remove every favorite, returning one outcome per removed id.
    pub fn clear(&self) -> Vec<ToggleOutcome> {
        let _serial = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);
        let ids = self.list();
        if ids.is_empty() {
            return Vec::new();
        }
        if let Err(err) = self.port.set(&self.key, &codec::encode(&[])) {
            warn!(error = %err, "failed to clear favorites");
            return Vec::new();
        }
        let outcomes: Vec<_> = ids
            .into_iter()
            .map(|id| ToggleOutcome {
                id,
                now_favorite: false,
                changed: true,
            })
            .collect();
        for outcome in &outcomes {
            self.notify(outcome);
        }
        outcomes
    }

    /// Register a change listener.
    pub fn subscribe(&self, listener: FavoritesListener) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    fn notify(&self, outcome: &ToggleOutcome) {
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(outcome);
        }
    }
}
