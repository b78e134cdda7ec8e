//! Helpers shared by the engine integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use gamedeck_catalog::PersistencePort;
use gamedeck_engine::{CatalogEngine, Collaborators, EngineConfig};
use gamedeck_events::EngineEvent;
use gamedeck_test_support::{FakeCatalog, MemoryStore};

pub fn engine(catalog: &Arc<FakeCatalog>, store: &Arc<MemoryStore>) -> Arc<CatalogEngine> {
    let collaborators = Collaborators::from_client(catalog, Arc::clone(store) as Arc<dyn PersistencePort>);
    Arc::new(CatalogEngine::new(collaborators, EngineConfig::default()).expect("valid config"))
}

/// Yield to other tasks until `condition` holds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

pub fn browse_pages(events: &[EngineEvent]) -> Vec<Vec<u64>> {
    events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::BrowseResults { games, .. } => {
                Some(games.iter().map(|game| game.id.0).collect())
            }
            _ => None,
        })
        .collect()
}

pub fn favorites_pages(events: &[EngineEvent]) -> Vec<Vec<u64>> {
    events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::FavoritesResults { games, .. } => {
                Some(games.iter().map(|game| game.id().0).collect())
            }
            _ => None,
        })
        .collect()
}

pub fn notifications(events: &[EngineEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Notification { message, .. } => Some(message.clone()),
            _ => None,
        })
        .collect()
}
