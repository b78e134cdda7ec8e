mod support;

use std::sync::Arc;

use gamedeck_catalog::{CatalogError, FilterPatch, GameId};
use gamedeck_engine::ViewMode;
use gamedeck_events::EngineEvent;
use gamedeck_test_support::{FakeCatalog, MemoryStore, fixtures};

use support::{browse_pages, engine, notifications, wait_until};

#[tokio::test]
async fn single_page_search_hides_pagination() -> anyhow::Result<()> {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_query(Ok(fixtures::page(fixtures::numbered(1, 18), false)));
    let engine = engine(&catalog, &Arc::new(MemoryStore::new()));
    let mut events = engine.subscribe();

    engine.set_filter(FilterPatch::search("zelda")).await;

    let calls = catalog.query_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search.as_deref(), Some("zelda"));
    assert_eq!(calls[0].page, 1);
    assert_eq!(calls[0].page_size, 20);
    let keys: Vec<_> = calls[0].query_pairs().into_iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["search", "ordering", "page", "page_size"]);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.browse.len(), 18);
    assert!(!snapshot.browse_pagination.visible);
    assert!(!snapshot.browse_pagination.can_next);
    assert!(!snapshot.loading);

    let drained = events.drain();
    assert!(drained.contains(&EngineEvent::LoadingChanged { loading: true }));
    assert!(drained.contains(&EngineEvent::LoadingChanged { loading: false }));
    assert_eq!(browse_pages(&drained).len(), 1);
    Ok(())
}

#[tokio::test]
async fn cursor_drives_next_and_prev() -> anyhow::Result<()> {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_query(Ok(fixtures::page(fixtures::numbered(1, 20), true)));
    catalog.push_query(Ok(fixtures::page(fixtures::numbered(21, 20), false)));
    catalog.push_query(Ok(fixtures::page(fixtures::numbered(1, 20), true)));
    let engine = engine(&catalog, &Arc::new(MemoryStore::new()));

    engine.initialize().await;
    engine.prev_page().await;
    assert_eq!(catalog.query_calls().len(), 1);

    engine.next_page().await;
    assert_eq!(engine.current_request_spec().page, 2);
    let view = engine.snapshot().browse_pagination;
    assert!(view.visible);
    assert!(view.can_prev && !view.can_next);
    assert_eq!(view.label, "Page 2");

    engine.next_page().await;
    assert_eq!(catalog.query_calls().len(), 2);

    engine.prev_page().await;
    let calls = catalog.query_calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].page, 1);
    Ok(())
}

#[tokio::test]
async fn stale_response_is_discarded_and_followed_up_once() -> anyhow::Result<()> {
    let catalog = Arc::new(FakeCatalog::new());
    let first = catalog.push_gated_query();
    catalog.push_query(Ok(fixtures::page(fixtures::numbered(101, 20), true)));
    let engine = engine(&catalog, &Arc::new(MemoryStore::new()));
    let mut events = engine.subscribe();

    let in_flight = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.set_page(1).await }
    });
    wait_until(|| catalog.query_calls().len() == 1).await;
    assert!(engine.snapshot().loading);

    // Accepted into state without starting a second request.
    engine.set_page(3).await;
    engine.set_page(2).await;
    engine.next_page().await;
    assert_eq!(catalog.query_calls().len(), 1);
    assert_eq!(engine.current_request_spec().page, 2);

    first.resolve(Ok(fixtures::page(fixtures::numbered(1, 20), true)));
    in_flight.await?;

    let calls = catalog.query_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].page, 2);

    let pages = browse_pages(&events.drain());
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].first(), Some(&101));
    assert_eq!(engine.snapshot().browse[0].id, GameId(101));
    Ok(())
}

#[tokio::test]
async fn stale_failure_is_not_surfaced() -> anyhow::Result<()> {
    let catalog = Arc::new(FakeCatalog::new());
    let first = catalog.push_gated_query();
    catalog.push_query(Ok(fixtures::page(fixtures::numbered(1, 5), false)));
    let engine = engine(&catalog, &Arc::new(MemoryStore::new()));
    let mut events = engine.subscribe();

    let in_flight = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.set_page(1).await }
    });
    wait_until(|| catalog.query_calls().len() == 1).await;
    engine.set_filter(FilterPatch::search("mario")).await;

    first.resolve(Err(CatalogError::status(503, "unavailable")));
    in_flight.await?;

    let drained = events.drain();
    assert!(
        !drained
            .iter()
            .any(|event| matches!(event, EngineEvent::ErrorChanged { .. }))
    );
    assert!(notifications(&drained).is_empty());
    let calls = catalog.query_calls();
    assert_eq!(calls[1].search.as_deref(), Some("mario"));
    assert_eq!(engine.snapshot().browse.len(), 5);
    Ok(())
}

#[tokio::test]
async fn failure_shows_banner_and_retry_reissues_request() -> anyhow::Result<()> {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_query(Err(CatalogError::status(500, "internal error")));
    catalog.push_query(Ok(fixtures::page(fixtures::numbered(1, 20), true)));
    let engine = engine(&catalog, &Arc::new(MemoryStore::new()));
    let mut events = engine.subscribe();

    engine
        .set_filter(FilterPatch::search("halo").with_genre("4"))
        .await;
    assert!(engine.snapshot().error.is_some());
    let drained = events.drain();
    assert!(drained.iter().any(|event| matches!(
        event,
        EngineEvent::ErrorChanged { error: Some(_) }
    )));
    assert_eq!(notifications(&drained), vec!["Error loading games".to_string()]);

    engine.retry().await;
    let calls = catalog.query_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    assert!(engine.snapshot().error.is_none());
    assert!(
        events
            .drain()
            .contains(&EngineEvent::ErrorChanged { error: None })
    );
    Ok(())
}

#[tokio::test]
async fn unchanged_filter_does_not_refetch() -> anyhow::Result<()> {
    let catalog = Arc::new(FakeCatalog::new());
    let engine = engine(&catalog, &Arc::new(MemoryStore::new()));

    engine.set_filter(FilterPatch::search("doom")).await;
    engine.set_filter(FilterPatch::search("  doom ")).await;
    assert_eq!(catalog.query_calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn returning_home_reuses_loaded_page() -> anyhow::Result<()> {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_query(Ok(fixtures::page(fixtures::numbered(1, 20), true)));
    let engine = engine(&catalog, &Arc::new(MemoryStore::new()));

    engine.initialize().await;
    engine.enter_view(ViewMode::Favorites).await;
    engine.enter_view(ViewMode::Home).await;
    assert_eq!(catalog.query_calls().len(), 1);
    assert_eq!(engine.snapshot().browse.len(), 20);
    Ok(())
}

#[tokio::test]
async fn hung_request_leaves_state_operations_responsive() -> anyhow::Result<()> {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_pending_query();
    for id in 1..=12 {
        catalog.insert_detail(fixtures::detail(id, &format!("Game {id}"), &[], &[], None));
    }
    let store = Arc::new(MemoryStore::new());
    let engine = engine(&catalog, &store);

    // The core applies no timeout to collaborator calls; this request never
    // resolves and the browse view stays busy.
    let hung = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.set_page(1).await }
    });
    wait_until(|| catalog.query_calls().len() == 1).await;

    for id in 1..=12 {
        assert!(engine.toggle_favorite(GameId(id)).await.now_favorite);
    }
    engine.enter_view(ViewMode::Favorites).await;
    engine.next_page().await;
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.favorites.len(), 2);
    assert!(snapshot.loading);

    engine.enter_view(ViewMode::Home).await;
    engine.next_page().await;
    assert_eq!(catalog.query_calls().len(), 1);
    assert!(!hung.is_finished());
    hung.abort();
    Ok(())
}
