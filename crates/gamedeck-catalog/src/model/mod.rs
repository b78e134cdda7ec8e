//! Core catalog domain types shared across the workspace.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseOrderingError;

/// Default number of games requested per browse page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Stable, server-assigned game identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl Display for GameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl From<u64> for GameId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// `{id, name}` reference used for genres, developers and filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    /// Remote identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
}

impl NamedRef {
    /// Convenience constructor.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Platform wrapper as delivered by the catalog (`{"platform": {...}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
    /// Platform reference.
    pub platform: NamedRef,
}

/// Game summary returned by catalog queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Stable identifier.
    pub id: GameId,
    /// Display name.
    pub name: String,
    /// Average rating in `[0, 5]`; absent when unrated.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Cover image URL.
    #[serde(default)]
    pub background_image: Option<String>,
    /// Release date as reported by the catalog (`YYYY-MM-DD`).
    #[serde(default)]
    pub released: Option<String>,
    /// Platforms in catalog order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<PlatformEntry>,
    /// Genres in catalog order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<NamedRef>,
}

impl GameSummary {
    /// Minimal summary with only an id and a name.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: GameId(id),
            name: name.into(),
            rating: None,
            background_image: None,
            released: None,
            platforms: Vec::new(),
            genres: Vec::new(),
        }
    }

    /// Platform names in catalog order.
    pub fn platform_names(&self) -> impl Iterator<Item = &str> {
        self.platforms.iter().map(|entry| entry.platform.name.as_str())
    }

    /// Genre names in catalog order.
    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(|genre| genre.name.as_str())
    }
}

/// Full game record returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetail {
    /// Summary fields shared with list results.
    #[serde(flatten)]
    pub summary: GameSummary,
    /// Plain-text description.
    #[serde(default)]
    pub description_raw: Option<String>,
    /// Developer studios.
    #[serde(default, deserialize_with = "null_as_default")]
    pub developers: Vec<NamedRef>,
    /// Publishers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub publishers: Vec<NamedRef>,
    /// Metacritic score when known.
    #[serde(default)]
    pub metacritic: Option<u32>,
    /// Official website.
    #[serde(default)]
    pub website: Option<String>,
}

impl GameDetail {
    /// Wrap a summary without extra detail fields.
    #[must_use]
    pub const fn from_summary(summary: GameSummary) -> Self {
        Self {
            summary,
            description_raw: None,
            developers: Vec::new(),
            publishers: Vec::new(),
            metacritic: None,
            website: None,
        }
    }

    /// Identifier of the underlying game.
    #[must_use]
    pub const fn id(&self) -> GameId {
        self.summary.id
    }
}

/// Screenshot reference for the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    /// Screenshot identifier.
    #[serde(default)]
    pub id: u64,
    /// Image URL.
    pub image: String,
}

/// Fields the catalog can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Alphabetical by name.
    Name,
    /// Release date.
    Released,
    /// Date added to the catalog.
    Added,
    /// Record creation date.
    Created,
    /// Record update date.
    Updated,
    /// Average user rating.
    Rating,
    /// Metacritic score.
    Metacritic,
}

impl SortKey {
    /// Wire name of the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Released => "released",
            Self::Added => "added",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Rating => "rating",
            Self::Metacritic => "metacritic",
        }
    }
}

/// Catalog ordering, rendered as `name`, `-rating`, `-released`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ordering {
    /// Field to sort by.
    pub key: SortKey,
    /// Sort in descending order.
    pub descending: bool,
}

impl Ordering {
    /// Ascending by name.
    pub const NAME: Self = Self {
        key: SortKey::Name,
        descending: false,
    };
    /// Highest rated first.
    pub const RATING_DESC: Self = Self {
        key: SortKey::Rating,
        descending: true,
    };
    /// Newest releases first.
    pub const RELEASED_DESC: Self = Self {
        key: SortKey::Released,
        descending: true,
    };

    /// Wire representation understood by the catalog.
    #[must_use]
    pub fn as_param(self) -> String {
        if self.descending {
            format!("-{}", self.key.as_str())
        } else {
            self.key.as_str().to_string()
        }
    }
}

impl Default for Ordering {
    fn default() -> Self {
        Self::RATING_DESC
    }
}

impl Display for Ordering {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}

impl FromStr for Ordering {
    type Err = ParseOrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (descending, field) = trimmed
            .strip_prefix('-')
            .map_or((false, trimmed), |rest| (true, rest));
        let key = match field {
            "name" => SortKey::Name,
            "released" => SortKey::Released,
            "added" => SortKey::Added,
            "created" => SortKey::Created,
            "updated" => SortKey::Updated,
            "rating" => SortKey::Rating,
            "metacritic" => SortKey::Metacritic,
            _ => {
                return Err(ParseOrderingError {
                    input: s.to_string(),
                });
            }
        };
        Ok(Self { key, descending })
    }
}

impl Serialize for Ordering {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_param())
    }
}

impl<'de> Deserialize<'de> for Ordering {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Live filter state for a view context.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search term (trimmed).
    pub search: String,
    /// Selected platform identifier.
    pub platform_id: Option<String>,
    /// Selected genre identifier.
    pub genre_id: Option<String>,
    /// Sort order.
    pub ordering: Ordering,
}

impl FilterState {
    /// Merge a partial update, returning whether any field changed.
    pub fn apply(&mut self, patch: &FilterPatch) -> bool {
        let mut next = self.clone();
        if let Some(search) = &patch.search {
            search.trim().clone_into(&mut next.search);
        }
        if let Some(platform) = &patch.platform_id {
            next.platform_id = non_empty(platform);
        }
        if let Some(genre) = &patch.genre_id {
            next.genre_id = non_empty(genre);
        }
        if let Some(ordering) = patch.ordering {
            next.ordering = ordering;
        }
        if next == *self {
            return false;
        }
        *self = next;
        true
    }
}

/// Partial filter update; `None` leaves a field untouched and an empty string
/// clears platform or genre.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPatch {
    /// New search term.
    pub search: Option<String>,
    /// New platform selection.
    pub platform_id: Option<String>,
    /// New genre selection.
    pub genre_id: Option<String>,
    /// New ordering.
    pub ordering: Option<Ordering>,
}

impl FilterPatch {
    /// Patch that only updates the search term.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    /// Patch that only updates the ordering.
    #[must_use]
    pub fn ordering(ordering: Ordering) -> Self {
        Self {
            ordering: Some(ordering),
            ..Self::default()
        }
    }

    /// Add a platform selection to the patch.
    #[must_use]
    pub fn with_platform(mut self, platform_id: impl Into<String>) -> Self {
        self.platform_id = Some(platform_id.into());
        self
    }

    /// Add a genre selection to the patch.
    #[must_use]
    pub fn with_genre(mut self, genre_id: impl Into<String>) -> Self {
        self.genre_id = Some(genre_id.into());
        self
    }
}

/// Request specification handed to the catalog client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Search term.
    pub search: Option<String>,
    /// Platform filter.
    pub platforms: Option<String>,
    /// Genre filter.
    pub genres: Option<String>,
    /// Sort order.
    pub ordering: Ordering,
    /// One-based page number.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
}

impl QuerySpec {
    /// Build a request from a filter state and page coordinates.
    #[must_use]
    pub fn from_filter(filter: &FilterState, page: u32, page_size: u32) -> Self {
        Self {
            search: non_empty(&filter.search),
            platforms: filter.platform_id.as_deref().and_then(non_empty),
            genres: filter.genre_id.as_deref().and_then(non_empty),
            ordering: filter.ordering,
            page: page.max(1),
            page_size,
        }
    }

    /// Query parameters with absent or empty fields omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(search) = self.search.as_deref().and_then(non_empty) {
            pairs.push(("search", search));
        }
        if let Some(platforms) = self.platforms.as_deref().and_then(non_empty) {
            pairs.push(("platforms", platforms));
        }
        if let Some(genres) = self.genres.as_deref().and_then(non_empty) {
            pairs.push(("genres", genres));
        }
        pairs.push(("ordering", self.ordering.as_param()));
        pairs.push(("page", self.page.to_string()));
        pairs.push(("page_size", self.page_size.to_string()));
        pairs
    }
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::from_filter(&FilterState::default(), 1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of catalog results plus cursors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Games on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<GameSummary>,
    /// Total matches reported by the server.
    #[serde(default)]
    pub count: u64,
    /// Opaque locator of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// Opaque locator of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl CatalogPage {
    /// Whether the server reported a following page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ordering_round_trips_wire_names() {
        for raw in ["name", "-rating", "-released", "metacritic", "-added"] {
            let parsed: Ordering = raw.parse().expect("valid ordering");
            assert_eq!(parsed.as_param(), raw);
        }
        assert!("popularity".parse::<Ordering>().is_err());
        assert_eq!(Ordering::default(), Ordering::RATING_DESC);
    }

    #[test]
    fn query_pairs_omit_empty_fields() {
        let filter = FilterState {
            search: String::new(),
            platform_id: Some("4".into()),
            genre_id: Some("  ".into()),
            ordering: Ordering::NAME,
        };
        let spec = QuerySpec::from_filter(&filter, 2, 20);
        let pairs = spec.query_pairs();
        let keys: Vec<_> = pairs.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, ["platforms", "ordering", "page", "page_size"]);
        assert!(pairs.contains(&("ordering", "name".to_string())));
        assert!(pairs.contains(&("page", "2".to_string())));
    }

    #[test]
    fn filter_apply_reports_changes_and_trims() {
        let mut filter = FilterState::default();
        assert!(filter.apply(&FilterPatch::search("  zelda ")));
        assert_eq!(filter.search, "zelda");
        assert!(!filter.apply(&FilterPatch::search("zelda")));

        assert!(filter.apply(&FilterPatch::default().with_platform("4")));
        assert_eq!(filter.platform_id.as_deref(), Some("4"));
        assert!(filter.apply(&FilterPatch::default().with_platform("")));
        assert_eq!(filter.platform_id, None);
    }

    #[test]
    fn summary_decodes_catalog_shape_with_nulls() {
        let payload = json!({
            "id": 3498,
            "name": "Grand Theft Auto V",
            "rating": 4.47,
            "background_image": null,
            "platforms": [{"platform": {"id": 4, "name": "PC", "slug": "pc"}}],
            "genres": null
        });
        let summary: GameSummary = serde_json::from_value(payload).expect("decode summary");
        assert_eq!(summary.id, GameId(3498));
        assert_eq!(summary.platform_names().collect::<Vec<_>>(), ["PC"]);
        assert!(summary.genres.is_empty());
        assert!(summary.background_image.is_none());
    }

    #[test]
    fn detail_flattens_summary_fields() {
        let payload = json!({
            "id": 1042,
            "name": "Hollow Knight",
            "rating": 4.4,
            "description_raw": "Bugs.",
            "developers": [{"id": 1, "name": "Team Cherry"}],
            "metacritic": 87
        });
        let detail: GameDetail = serde_json::from_value(payload).expect("decode detail");
        assert_eq!(detail.id(), GameId(1042));
        assert_eq!(detail.summary.name, "Hollow Knight");
        assert_eq!(detail.developers.len(), 1);
        assert_eq!(detail.metacritic, Some(87));
    }

    #[test]
    fn catalog_page_reports_cursor() {
        let page: CatalogPage = serde_json::from_value(json!({
            "count": 18,
            "next": null,
            "previous": null,
            "results": []
        }))
        .expect("decode page");
        assert!(!page.has_next());
        assert_eq!(page.count, 18);
    }
}
