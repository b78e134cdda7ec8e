//! Collaborator traits consumed by the state engine and implemented by adapters.

use async_trait::async_trait;

use crate::error::{CatalogResult, PersistenceResult};
use crate::model::{CatalogPage, GameDetail, GameId, NamedRef, QuerySpec, Screenshot};

/// Server-paginated game search.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of results for the supplied request specification.
    async fn query(&self, spec: &QuerySpec) -> CatalogResult<CatalogPage>;
}

/// Per-game detail lookups.
#[async_trait]
pub trait DetailClient: Send + Sync {
    /// Fetch the full record for a game, failing with `NotFound` when absent.
    async fn game(&self, id: GameId) -> CatalogResult<GameDetail>;

    /// Fetch screenshots for a game. Implementations return an empty list on
    /// failure instead of raising.
    async fn screenshots(&self, id: GameId) -> Vec<Screenshot> {
        let _ = id;
        Vec::new()
    }
}

/// Filter option lookups.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// All platforms known to the catalog.
    async fn platforms(&self) -> CatalogResult<Vec<NamedRef>>;

    /// All genres known to the catalog.
    async fn genres(&self) -> CatalogResult<Vec<NamedRef>>;
}

/// Durable key/value storage for small string documents.
pub trait PersistencePort: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> PersistenceResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GameSummary;

    struct OnlyDetail;

    #[async_trait]
    impl DetailClient for OnlyDetail {
        async fn game(&self, id: GameId) -> CatalogResult<GameDetail> {
            Ok(GameDetail::from_summary(GameSummary::new(id.0, "stub")))
        }
    }

    #[tokio::test]
    async fn screenshots_default_to_empty() {
        let client = OnlyDetail;
        assert!(client.screenshots(GameId(1)).await.is_empty());
        let detail = client.game(GameId(9)).await.expect("detail");
        assert_eq!(detail.id(), GameId(9));
    }
}
