//! Builders for games and catalog pages.

use gamedeck_catalog::{CatalogPage, GameDetail, GameSummary, NamedRef, PlatformEntry};

/// Summary with platforms, genres and a rating.
#[must_use]
pub fn summary(
    id: u64,
    name: &str,
    platforms: &[&str],
    genres: &[&str],
    rating: Option<f64>,
) -> GameSummary {
    let mut game = GameSummary::new(id, name);
    game.rating = rating;
    game.platforms = platforms
        .iter()
        .zip(1_u64..)
        .map(|(name, idx)| PlatformEntry {
            platform: NamedRef::new(idx, *name),
        })
        .collect();
    game.genres = genres
        .iter()
        .zip(1_u64..)
        .map(|(name, idx)| NamedRef::new(idx, *name))
        .collect();
    game
}

/// Detail record wrapping [`summary`].
#[must_use]
pub fn detail(
    id: u64,
    name: &str,
    platforms: &[&str],
    genres: &[&str],
    rating: Option<f64>,
) -> GameDetail {
    GameDetail::from_summary(summary(id, name, platforms, genres, rating))
}

/// `count` plain summaries with ids starting at `first_id`, named `Game <id>`.
#[must_use]
pub fn numbered(first_id: u64, count: u64) -> Vec<GameSummary> {
    (first_id..first_id + count)
        .map(|id| GameSummary::new(id, format!("Game {id}")))
        .collect()
}

/// Catalog page over `results`, with a next cursor when `has_next`.
#[must_use]
pub fn page(results: Vec<GameSummary>, has_next: bool) -> CatalogPage {
    let count = results.len() as u64;
    CatalogPage {
        results,
        count,
        next: has_next.then(|| "https://api.example.test/games?page=next".to_string()),
        previous: None,
    }
}
