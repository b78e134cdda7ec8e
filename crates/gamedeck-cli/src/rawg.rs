//! HTTP adapter for RAWG-compatible catalog services.
//!
//! Every request carries the API key as the `key` query parameter. Endpoint
//! paths are appended to the base URL's path, so a base of
//! `https://api.rawg.io/api` resolves `/games` to `/api/games`.

use std::time::Duration;

use async_trait::async_trait;
use gamedeck_catalog::{
    CatalogClient, CatalogError, CatalogPage, CatalogResult, DetailClient, GameDetail, GameId,
    MetadataClient, NamedRef, QuerySpec, Screenshot,
};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

const OPTIONS_PAGE_SIZE: &str = "50";

#[derive(Deserialize)]
struct Listing<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

/// Catalog, detail and metadata client backed by the RAWG REST API.
#[derive(Debug, Clone)]
pub struct RawgClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl RawgClient {
    /// Build a client with its own connection pool and request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(base_url: Url, api_key: Option<String>, timeout: Duration) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CatalogError::network(format!("failed to build HTTP client: {err}")))?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Wrap an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CatalogError::network(format!("base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        if let Some(key) = self.api_key.as_deref() {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url, params: &[(&str, String)]) -> CatalogResult<T>
    where
        T: DeserializeOwned,
    {
        let path = url.path().to_string();
        debug!(path = %path, params = ?params, "catalog request");
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|err| CatalogError::network(format!("request to {path} failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::status(
                status.as_u16(),
                format!("{path} returned {status}"),
            ));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| CatalogError::Decode {
                message: format!("{path}: {err}"),
            })
    }

    async fn options(&self, resource: &str) -> CatalogResult<Vec<NamedRef>> {
        let url = self.endpoint(&[resource])?;
        let listing: Listing<NamedRef> = self
            .get_json(url, &[("page_size", OPTIONS_PAGE_SIZE.to_string())])
            .await?;
        Ok(listing.results)
    }
}

#[async_trait]
impl CatalogClient for RawgClient {
    async fn query(&self, spec: &QuerySpec) -> CatalogResult<CatalogPage> {
        let url = self.endpoint(&["games"])?;
        self.get_json(url, &spec.query_pairs()).await
    }
}

#[async_trait]
impl DetailClient for RawgClient {
    async fn game(&self, id: GameId) -> CatalogResult<GameDetail> {
        let url = self.endpoint(&["games", &id.to_string()])?;
        match self.get_json(url, &[]).await {
            Err(CatalogError::Network {
                status: Some(404), ..
            }) => Err(CatalogError::NotFound { id }),
            other => other,
        }
    }

    async fn screenshots(&self, id: GameId) -> Vec<Screenshot> {
        let url = match self.endpoint(&["games", &id.to_string(), "screenshots"]) {
            Ok(url) => url,
            Err(err) => {
                warn!(game_id = %id, error = %err, "screenshots unavailable");
                return Vec::new();
            }
        };
        match self.get_json::<Listing<Screenshot>>(url, &[]).await {
            Ok(listing) => listing.results,
            Err(err) => {
                warn!(game_id = %id, error = %err, "screenshots unavailable");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl MetadataClient for RawgClient {
    async fn platforms(&self) -> CatalogResult<Vec<NamedRef>> {
        self.options("platforms").await
    }

    async fn genres(&self) -> CatalogResult<Vec<NamedRef>> {
        self.options("genres").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedeck_catalog::{FilterPatch, FilterState, Ordering};
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, key: Option<&str>) -> RawgClient {
        let base = server.url("/api").parse().expect("valid URL");
        RawgClient::new(base, key.map(str::to_string), Duration::from_secs(5))
            .expect("client builds")
    }

    #[tokio::test]
    async fn query_sends_key_and_filters_and_decodes_page() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/games")
                .query_param("key", "secret")
                .query_param("search", "zelda")
                .query_param("genres", "4")
                .query_param("ordering", "name")
                .query_param("page", "2")
                .query_param("page_size", "20");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "count": 41,
                    "next": "https://api.rawg.io/api/games?page=3",
                    "previous": "https://api.rawg.io/api/games?page=1",
                    "results": [{
                        "id": 22511,
                        "name": "The Legend of Zelda: Breath of the Wild",
                        "rating": 4.5,
                        "background_image": null,
                        "released": "2017-03-02",
                        "platforms": [{"platform": {"id": 7, "name": "Nintendo Switch"}}],
                        "genres": [{"id": 4, "name": "Action"}]
                    }]
                }));
        });

        let mut filter = FilterState::default();
        assert!(filter.apply(&FilterPatch::search("zelda").with_genre("4")));
        filter.ordering = Ordering::NAME;
        let spec = QuerySpec::from_filter(&filter, 2, 20);

        let page = client_for(&server, Some("secret"))
            .query(&spec)
            .await
            .expect("query succeeds");
        mock.assert();
        assert_eq!(page.count, 41);
        assert!(page.has_next());
        assert_eq!(page.results[0].id, GameId(22511));
        assert_eq!(
            page.results[0].platform_names().collect::<Vec<_>>(),
            vec!["Nintendo Switch"]
        );
    }

    #[tokio::test]
    async fn server_error_maps_to_network_status() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/games");
            then.status(503);
        });

        let err = client_for(&server, None)
            .query(&QuerySpec::default())
            .await
            .expect_err("503 should fail");
        assert!(matches!(
            err,
            CatalogError::Network {
                status: Some(503),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn missing_game_maps_to_not_found() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/games/404");
            then.status(404).json_body(json!({"detail": "Not found."}));
        });

        let err = client_for(&server, Some("secret"))
            .game(GameId(404))
            .await
            .expect_err("404 should fail");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn detail_decodes_flattened_summary() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/games/3328");
            then.status(200).json_body(json!({
                "id": 3328,
                "name": "The Witcher 3: Wild Hunt",
                "rating": 4.66,
                "released": "2015-05-18",
                "description_raw": "An open world RPG.",
                "developers": [{"id": 9023, "name": "CD PROJEKT RED"}],
                "publishers": null,
                "metacritic": 92,
                "website": "https://thewitcher.com"
            }));
        });

        let detail = client_for(&server, None)
            .game(GameId(3328))
            .await
            .expect("detail decodes");
        assert_eq!(detail.id(), GameId(3328));
        assert_eq!(detail.metacritic, Some(92));
        assert_eq!(detail.developers[0].name, "CD PROJEKT RED");
        assert!(detail.publishers.is_empty());
        assert!(detail.summary.platforms.is_empty());
    }

    #[tokio::test]
    async fn screenshot_failure_degrades_to_empty() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/games/1/screenshots");
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/games/2/screenshots");
            then.status(200).json_body(json!({
                "count": 1,
                "results": [{"id": 10, "image": "https://media.rawg.io/a.jpg"}]
            }));
        });

        let client = client_for(&server, None);
        assert!(client.screenshots(GameId(1)).await.is_empty());
        let shots = client.screenshots(GameId(2)).await;
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].image, "https://media.rawg.io/a.jpg");
    }

    #[tokio::test]
    async fn filter_options_request_fifty_entries() {
        let server = MockServer::start_async().await;
        let platforms = server.mock(|when, then| {
            when.method(GET)
                .path("/api/platforms")
                .query_param("page_size", "50");
            then.status(200).json_body(json!({
                "results": [{"id": 4, "name": "PC"}, {"id": 187, "name": "PlayStation 5"}]
            }));
        });
        let genres = server.mock(|when, then| {
            when.method(GET).path("/api/genres").query_param("page_size", "50");
            then.status(200).json_body(json!({"results": [{"id": 4, "name": "Action"}]}));
        });

        let client = client_for(&server, Some("secret"));
        let found = client.platforms().await.expect("platforms load");
        assert_eq!(found[1], NamedRef::new(187, "PlayStation 5"));
        assert_eq!(client.genres().await.expect("genres load").len(), 1);
        platforms.assert();
        genres.assert();
    }

    #[tokio::test]
    async fn garbage_body_maps_to_decode_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/genres");
            then.status(200).body("<html>maintenance</html>");
        });

        let err = client_for(&server, None)
            .genres()
            .await
            .expect_err("html is not json");
        assert!(matches!(err, CatalogError::Decode { .. }));
    }
}
