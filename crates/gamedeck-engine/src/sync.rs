//! Propagates favorite changes to every rendered card without refetching.

use std::collections::{BTreeMap, HashSet};

use gamedeck_catalog::GameId;
use gamedeck_events::{Indicator, IndicatorUpdate, Surface};

use crate::favorites::ToggleOutcome;

/// Tracks which games are rendered on which surface.
#[derive(Debug, Clone, Default)]
pub struct SyncBridge {
    rendered: BTreeMap<Surface, HashSet<GameId>>,
}

impl SyncBridge {
    /// Empty bridge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ids rendered on `surface`.
    pub fn set_rendered(&mut self, surface: Surface, ids: impl IntoIterator<Item = GameId>) {
        let ids: HashSet<_> = ids.into_iter().collect();
        if ids.is_empty() {
            self.rendered.remove(&surface);
        } else {
            self.rendered.insert(surface, ids);
        }
    }

    /// Forget everything rendered on `surface`.
    pub fn clear(&mut self, surface: Surface) {
        self.rendered.remove(&surface);
    }

    /// Indicator updates for a toggle, one per surface rendering the game.
    /// Unchanged toggles produce nothing.
    #[must_use]
    pub fn updates_for(&self, outcome: &ToggleOutcome) -> Vec<IndicatorUpdate> {
        if !outcome.changed {
            return Vec::new();
        }
        self.rendered
            .iter()
            .filter(|(_, ids)| ids.contains(&outcome.id))
            .map(|(surface, _)| IndicatorUpdate {
                id: outcome.id,
                surface: *surface,
                indicator: Indicator::for_membership(outcome.now_favorite),
            })
            .collect()
    }
}
