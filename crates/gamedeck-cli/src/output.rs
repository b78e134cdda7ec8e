//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use gamedeck_catalog::{GameDetail, NamedRef, Screenshot};
use gamedeck_engine::{CardView, rating_label, star_rating};
use gamedeck_events::{EngineEvent, Indicator, NotificationLevel, PaginationView};
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const NAME_WIDTH: usize = 40;

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn render_cards(
    cards: &[CardView],
    pagination: &PaginationView,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "games": cards,
            "pagination": pagination,
        })),
        OutputFormat::Table => {
            print!("{}", card_table(cards, pagination));
            Ok(())
        }
    }
}

pub(crate) fn card_table(cards: &[CardView], pagination: &PaginationView) -> String {
    let mut out = String::new();
    if cards.is_empty() {
        out.push_str("No games found\n");
        return out;
    }
    let _ = writeln!(
        out,
        "{:>8}  {:<NAME_WIDTH$}  {:<5}  {:>4}  {:<2}  PLATFORMS",
        "ID", "NAME", "STARS", "RATE", "FAV"
    );
    for card in cards {
        let _ = writeln!(
            out,
            "{:>8}  {:<NAME_WIDTH$}  {:<5}  {:>4}  {:<2}  {}",
            card.id,
            truncate(&card.name, NAME_WIDTH),
            card.stars,
            card.rating,
            card.favorite.icon,
            card.platforms.join(", ")
        );
    }
    if pagination.visible {
        let _ = writeln!(out, "{}", pagination_line(pagination));
    }
    out
}

pub(crate) fn pagination_line(pagination: &PaginationView) -> String {
    let prev = if pagination.can_prev { "< prev" } else { "      " };
    let next = if pagination.can_next { "next >" } else { "" };
    format!("{prev}  {}  {next}", pagination.label)
        .trim_end()
        .to_string()
}

pub(crate) fn render_detail(
    detail: &GameDetail,
    screenshots: &[Screenshot],
    favorite: &Indicator,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "game": detail,
            "screenshots": screenshots,
            "favorite": favorite,
        })),
        OutputFormat::Table => {
            print!("{}", detail_text(detail, screenshots, favorite));
            Ok(())
        }
    }
}

pub(crate) fn detail_text(
    detail: &GameDetail,
    screenshots: &[Screenshot],
    favorite: &Indicator,
) -> String {
    let summary = &detail.summary;
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", favorite.icon, summary.name);
    let _ = writeln!(out, "id: {}", summary.id);
    let _ = writeln!(
        out,
        "rating: {} ({})",
        star_rating(summary.rating),
        rating_label(summary.rating)
    );
    if let Some(released) = &summary.released {
        let _ = writeln!(out, "released: {released}");
    }
    if let Some(score) = detail.metacritic {
        let _ = writeln!(out, "metacritic: {score}");
    }
    let platforms: Vec<&str> = summary.platform_names().collect();
    if !platforms.is_empty() {
        let _ = writeln!(out, "platforms: {}", platforms.join(", "));
    }
    let genres: Vec<&str> = summary.genre_names().collect();
    if !genres.is_empty() {
        let _ = writeln!(out, "genres: {}", genres.join(", "));
    }
    if !detail.developers.is_empty() {
        let _ = writeln!(out, "developers: {}", names(&detail.developers));
    }
    if !detail.publishers.is_empty() {
        let _ = writeln!(out, "publishers: {}", names(&detail.publishers));
    }
    if let Some(website) = &detail.website {
        let _ = writeln!(out, "website: {website}");
    }
    if let Some(description) = detail
        .description_raw
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        let _ = writeln!(out, "\n{description}");
    }
    if !screenshots.is_empty() {
        let _ = writeln!(out, "\nscreenshots:");
        for shot in screenshots {
            let _ = writeln!(out, "  {}", shot.image);
        }
    }
    out
}

pub(crate) fn render_options(
    platforms: &[NamedRef],
    genres: &[NamedRef],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "platforms": platforms,
            "genres": genres,
        })),
        OutputFormat::Table => {
            println!("platforms:");
            for option in platforms {
                println!("  {:>6}  {}", option.id, option.name);
            }
            println!("genres:");
            for option in genres {
                println!("  {:>6}  {}", option.id, option.name);
            }
            Ok(())
        }
    }
}

/// One line for events worth surfacing in the interactive shell.
pub(crate) fn event_line(event: &EngineEvent) -> Option<String> {
    match event {
        EngineEvent::Notification { level, message } => {
            let tag = match level {
                NotificationLevel::Success => "ok",
                NotificationLevel::Warning => "note",
                NotificationLevel::Error => "error",
            };
            Some(format!("[{tag}] {message}"))
        }
        EngineEvent::ErrorChanged { error: Some(error) } => {
            Some(format!("{error} (type 'retry' to try again)"))
        }
        EngineEvent::DetailFailed { id, message } => {
            Some(format!("could not open game {id}: {message}"))
        }
        EngineEvent::ViewChanged { view } => Some(format!("view: {view:?}").to_lowercase()),
        EngineEvent::LoadingChanged { loading: true } => Some("loading...".to_string()),
        _ => None,
    }
}

fn names(refs: &[NamedRef]) -> String {
    refs.iter()
        .map(|named| named.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedeck_catalog::GameId;
    use gamedeck_test_support::fixtures;

    fn pagination(page: u32, can_prev: bool, can_next: bool) -> PaginationView {
        PaginationView {
            visible: true,
            page,
            total_pages: None,
            can_prev,
            can_next,
            label: format!("Page {page}"),
        }
    }

    #[test]
    fn card_table_lists_games_and_controls() {
        let game = fixtures::summary(1042, "Hollow Knight", &["PC", "Nintendo Switch"], &[], Some(4.4));
        let cards = vec![CardView::from_summary(&game, true)];
        let table = card_table(&cards, &pagination(2, true, true));

        assert!(table.contains("Hollow Knight"));
        assert!(table.contains("★★★★☆"));
        assert!(table.contains("PC, Nintendo Switch"));
        assert!(table.contains("< prev  Page 2  next >"));
    }

    #[test]
    fn empty_results_say_so() {
        assert_eq!(
            card_table(&[], &PaginationView::hidden()),
            "No games found\n"
        );
    }

    #[test]
    fn pagination_line_hides_disabled_controls() {
        assert_eq!(pagination_line(&pagination(1, false, true)), "        Page 1  next >");
        assert_eq!(pagination_line(&pagination(3, true, false)), "< prev  Page 3");
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn detail_text_includes_known_fields() {
        let mut detail = fixtures::detail(3328, "The Witcher 3", &["PC"], &["RPG"], Some(4.66));
        detail.metacritic = Some(92);
        detail.description_raw = Some("Geralt returns.".into());
        let shots = vec![Screenshot {
            id: 1,
            image: "https://media.example.test/w3.jpg".into(),
        }];

        let text = detail_text(&detail, &shots, &Indicator::for_membership(true));
        assert!(text.starts_with("❤️ The Witcher 3"));
        assert!(text.contains("metacritic: 92"));
        assert!(text.contains("genres: RPG"));
        assert!(text.contains("Geralt returns."));
        assert!(text.contains("https://media.example.test/w3.jpg"));
    }

    #[test]
    fn shell_surfaces_notifications_and_errors() {
        let toast = EngineEvent::Notification {
            level: NotificationLevel::Success,
            message: "Game added to favorites".into(),
        };
        assert_eq!(event_line(&toast).as_deref(), Some("[ok] Game added to favorites"));

        let failed = EngineEvent::DetailFailed {
            id: GameId(9),
            message: "game 9 not found".into(),
        };
        assert!(event_line(&failed).is_some_and(|line| line.contains("game 9")));
        assert!(event_line(&EngineEvent::DetailClosed).is_none());
    }
}
