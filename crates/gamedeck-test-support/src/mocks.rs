//! Scripted collaborator fakes.
//!
//! [`FakeCatalog`] implements every remote collaborator trait. Query responses
//! are scripted in order and can be held open until a test releases them, which
//! is how out-of-order and in-flight scenarios are driven deterministically.

use std::collections::{HashMap, VecDeque};
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use gamedeck_catalog::{
    CatalogClient, CatalogError, CatalogPage, CatalogResult, DetailClient, GameDetail, GameId,
    MetadataClient, NamedRef, PersistenceError, PersistencePort, PersistenceResult, QuerySpec,
    Screenshot,
};
use tokio::sync::{Semaphore, oneshot};

enum Scripted {
    Ready(CatalogResult<CatalogPage>),
    Gated(oneshot::Receiver<CatalogResult<CatalogPage>>),
    Pending,
}

#[derive(Default)]
struct CatalogState {
    query_calls: Vec<QuerySpec>,
    query_script: VecDeque<Scripted>,
    fallback: CatalogPage,
    details: HashMap<GameId, GameDetail>,
    detail_calls: Vec<GameId>,
    detail_gate: Option<Arc<Semaphore>>,
    screenshots: HashMap<GameId, Vec<Screenshot>>,
    platforms: Vec<NamedRef>,
    genres: Vec<NamedRef>,
    metadata_fails: bool,
}

/// In-memory catalog, detail and metadata client.
#[derive(Default)]
pub struct FakeCatalog {
    state: Mutex<CatalogState>,
}

/// Sender that resolves a held query.
pub struct QueryGate(oneshot::Sender<CatalogResult<CatalogPage>>);

impl QueryGate {
    /// Resolve the held query with `result`.
    pub fn resolve(self, result: CatalogResult<CatalogPage>) {
        let _ = self.0.send(result);
    }
}

impl FakeCatalog {
    /// Empty catalog; unscripted queries answer with an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an immediate query response.
    pub fn push_query(&self, result: CatalogResult<CatalogPage>) {
        self.lock().query_script.push_back(Scripted::Ready(result));
    }

    /// Queue a query response that waits until the returned gate resolves it.
    #[must_use]
    pub fn push_gated_query(&self) -> QueryGate {
        let (tx, rx) = oneshot::channel();
        self.lock().query_script.push_back(Scripted::Gated(rx));
        QueryGate(tx)
    }

    /// Queue a query that never resolves.
    pub fn push_pending_query(&self) {
        self.lock().query_script.push_back(Scripted::Pending);
    }

    /// Page returned once the script is exhausted.
    pub fn set_fallback(&self, page: CatalogPage) {
        self.lock().fallback = page;
    }

    /// Request specs received so far, in call order.
    #[must_use]
    pub fn query_calls(&self) -> Vec<QuerySpec> {
        self.lock().query_calls.clone()
    }

    /// Register a detail record.
    pub fn insert_detail(&self, detail: GameDetail) {
        self.lock().details.insert(detail.id(), detail);
    }

    /// Register screenshots for a game.
    pub fn insert_screenshots(&self, id: GameId, shots: Vec<Screenshot>) {
        self.lock().screenshots.insert(id, shots);
    }

    /// Detail ids requested so far, in call order.
    #[must_use]
    pub fn detail_calls(&self) -> Vec<GameId> {
        self.lock().detail_calls.clone()
    }

    /// Hold every detail lookup until permits are released on the returned
    /// semaphore.
    #[must_use]
    pub fn gate_details(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.lock().detail_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Set filter option lists.
    pub fn set_metadata(&self, platforms: Vec<NamedRef>, genres: Vec<NamedRef>) {
        let mut state = self.lock();
        state.platforms = platforms;
        state.genres = genres;
    }

    /// Make platform and genre lookups fail.
    pub fn fail_metadata(&self) {
        self.lock().metadata_fails = true;
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn query(&self, spec: &QuerySpec) -> CatalogResult<CatalogPage> {
        let scripted = {
            let mut state = self.lock();
            state.query_calls.push(spec.clone());
            state
                .query_script
                .pop_front()
                .unwrap_or_else(|| Scripted::Ready(Ok(state.fallback.clone())))
        };
        match scripted {
            Scripted::Ready(result) => result,
            Scripted::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(CatalogError::network("query gate dropped"))),
            Scripted::Pending => std::future::pending().await,
        }
    }
}

#[async_trait]
impl DetailClient for FakeCatalog {
    async fn game(&self, id: GameId) -> CatalogResult<GameDetail> {
        let gate = {
            let mut state = self.lock();
            state.detail_calls.push(id);
            state.detail_gate.clone()
        };
        if let Some(gate) = gate {
            gate.acquire()
                .await
                .map_err(|_| CatalogError::network("detail gate closed"))?
                .forget();
        }
        self.lock()
            .details
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound { id })
    }

    async fn screenshots(&self, id: GameId) -> Vec<Screenshot> {
        self.lock().screenshots.get(&id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl MetadataClient for FakeCatalog {
    async fn platforms(&self) -> CatalogResult<Vec<NamedRef>> {
        let state = self.lock();
        if state.metadata_fails {
            return Err(CatalogError::status(503, "metadata unavailable"));
        }
        Ok(state.platforms.clone())
    }

    async fn genres(&self) -> CatalogResult<Vec<NamedRef>> {
        let state = self.lock();
        if state.metadata_fails {
            return Err(CatalogError::status(503, "metadata unavailable"));
        }
        Ok(state.genres.clone())
    }
}

#[derive(Debug)]
struct InjectedFailure(&'static str);

impl fmt::Display for InjectedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Error for InjectedFailure {}

/// In-memory persistence port with failure injection.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Raw stored value, bypassing failure injection.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PersistencePort for MemoryStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PersistenceError::Read {
                key: key.to_string(),
                source: Box::new(InjectedFailure("injected read failure")),
            });
        }
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Write {
                key: key.to_string(),
                source: Box::new(InjectedFailure("injected write failure")),
            });
        }
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
