//! Presentation helpers for game cards.

use gamedeck_catalog::{GameId, GameSummary};
use gamedeck_events::Indicator;
use serde::Serialize;

/// Image shown when a game has no cover.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=300";

const CARD_TAG_LIMIT: usize = 3;

/// Five-glyph star rating: one filled star per whole point.
#[must_use]
pub fn star_rating(rating: Option<f64>) -> String {
    let full = rating.map_or(0, |value| {
        (1_u8..=5).filter(|step| f64::from(*step) <= value).count()
    });
    let mut stars = "\u{2605}".repeat(full);
    stars.push_str(&"\u{2606}".repeat(5 - full));
    stars
}

/// Rating with one decimal, or `N/A` when unrated.
#[must_use]
pub fn rating_label(rating: Option<f64>) -> String {
    match rating {
        Some(value) if value > 0.0 => format!("{value:.1}"),
        _ => "N/A".to_string(),
    }
}

/// Everything a render layer needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    /// Game identifier.
    pub id: GameId,
    /// Display name.
    pub name: String,
    /// Cover image or the placeholder.
    pub image: String,
    /// Star glyphs.
    pub stars: String,
    /// Numeric rating label.
    pub rating: String,
    /// Up to three platform names.
    pub platforms: Vec<String>,
    /// Up to three genre names.
    pub genres: Vec<String>,
    /// Favorite toggle state.
    pub favorite: Indicator,
}

impl CardView {
    /// Build a card for `game` with the given favorite membership.
    #[must_use]
    pub fn from_summary(game: &GameSummary, is_favorite: bool) -> Self {
        Self {
            id: game.id,
            name: game.name.clone(),
            image: game
                .background_image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            stars: star_rating(game.rating),
            rating: rating_label(game.rating),
            platforms: game
                .platform_names()
                .take(CARD_TAG_LIMIT)
                .map(str::to_string)
                .collect(),
            genres: game
                .genre_names()
                .take(CARD_TAG_LIMIT)
                .map(str::to_string)
                .collect(),
            favorite: Indicator::for_membership(is_favorite),
        }
    }
}
