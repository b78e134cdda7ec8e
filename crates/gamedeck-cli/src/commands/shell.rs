//! Interactive session. Engine events are rendered by a background task as
//! they arrive; `type` feeds the debounced search router while `search`
//! submits immediately.

use std::io::Write as _;
use std::sync::Arc;

use anyhow::anyhow;
use gamedeck_catalog::{FilterPatch, GameId, Ordering};
use gamedeck_engine::{CatalogEngine, InputRouter, ViewMode, spawn_input_router};
use gamedeck_events::{EngineEvent, EventStream};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::cli::{OutputFormat, parse_ordering};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{card_table, detail_text, event_line, render_options};

const HELP: &str = "\
commands:
  home | favorites         switch view
  type <text>              live search (applied after a pause)
  search <text>            search now
  platform <id> | platform clear only games on a platform
  genre <id> | genre clear only games in a genre
  sort <ordering>          name, -rating, -released, ...
  next | prev | page <n>   paginate the active view
  fav <id>                 add or remove a favorite
  show <id> | close        open or close a game
  filters                  list platform and genre options
  retry | dismiss          re-run or hide a failed search
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Help,
    View(ViewMode),
    Type(String),
    Search(String),
    Platform(String),
    Genre(String),
    Sort(Ordering),
    Next,
    Prev,
    Page(u32),
    Toggle(GameId),
    Show(GameId),
    Close,
    Filters,
    Retry,
    Dismiss,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub(crate) fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => ShellCommand::Help,
        "home" => ShellCommand::View(ViewMode::Home),
        "favorites" | "favs" => ShellCommand::View(ViewMode::Favorites),
        "type" => ShellCommand::Type(rest.to_string()),
        "search" => ShellCommand::Search(rest.to_string()),
        "platform" => ShellCommand::Platform(selection(rest)),
        "genre" => ShellCommand::Genre(selection(rest)),
        "sort" => ShellCommand::Sort(parse_ordering(rest)?),
        "next" | "n" => ShellCommand::Next,
        "prev" | "p" => ShellCommand::Prev,
        "page" => ShellCommand::Page(
            rest.parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .ok_or_else(|| format!("invalid page '{rest}'"))?,
        ),
        "fav" => ShellCommand::Toggle(game_id(rest)?),
        "show" => ShellCommand::Show(game_id(rest)?),
        "close" => ShellCommand::Close,
        "filters" => ShellCommand::Filters,
        "retry" => ShellCommand::Retry,
        "dismiss" => ShellCommand::Dismiss,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn selection(rest: &str) -> String {
    if rest.eq_ignore_ascii_case("clear") {
        String::new()
    } else {
        rest.to_string()
    }
}

fn game_id(rest: &str) -> Result<GameId, String> {
    rest.parse::<GameId>()
        .map_err(|_| format!("invalid game id '{rest}'"))
}

pub(crate) async fn handle_shell(ctx: &AppContext) -> CliResult<()> {
    let engine = Arc::clone(&ctx.engine);
    let printer = spawn_printer(Arc::clone(&engine), engine.subscribe(), ctx.output);
    let router = spawn_input_router(Arc::clone(&engine), engine.config().debounce);
    engine.initialize().await;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let Some(line) = lines
            .next_line()
            .await
            .map_err(|err| CliError::failure(anyhow!("failed to read input: {err}")))?
        else {
            break;
        };
        match parse_line(&line) {
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => execute(ctx, &router, command).await,
            Ok(None) => {}
            Err(message) => eprintln!("{message}"),
        }
    }

    router.shutdown().await;
    printer.abort();
    Ok(())
}

pub(crate) async fn execute(ctx: &AppContext, router: &InputRouter, command: ShellCommand) {
    let engine = &ctx.engine;
    match command {
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::View(view) => engine.enter_view(view).await,
        ShellCommand::Type(text) => {
            if !router.keystroke(text) {
                eprintln!("search input is no longer accepted");
            }
        }
        ShellCommand::Search(text) => {
            if !router.submit(text) {
                eprintln!("search input is no longer accepted");
            }
        }
        ShellCommand::Platform(id) => {
            engine
                .set_filter(FilterPatch::default().with_platform(id))
                .await;
        }
        ShellCommand::Genre(id) => engine.set_filter(FilterPatch::default().with_genre(id)).await,
        ShellCommand::Sort(ordering) => engine.sort(ordering).await,
        ShellCommand::Next => engine.next_page().await,
        ShellCommand::Prev => engine.prev_page().await,
        ShellCommand::Page(page) => engine.set_page(page).await,
        ShellCommand::Toggle(id) => {
            if !engine.toggle_favorite(id).await.changed {
                eprintln!("favorites could not be saved");
            }
        }
        ShellCommand::Show(id) => {
            // Failures arrive as a DetailFailed event.
            let _ = engine.open_detail(id).await;
        }
        ShellCommand::Close => engine.close_detail(),
        ShellCommand::Filters => {
            engine.load_filter_options().await;
            let (platforms, genres) = engine.filter_options();
            if let Err(err) = render_options(&platforms, &genres, ctx.output) {
                eprintln!("{}", err.display_message());
            }
        }
        ShellCommand::Retry => engine.retry().await,
        ShellCommand::Dismiss => engine.dismiss_error(),
        ShellCommand::Quit => {}
    }
}

fn spawn_printer(
    engine: Arc<CatalogEngine>,
    mut events: EventStream,
    format: OutputFormat,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(envelope) = events.next().await {
            if format == OutputFormat::Json {
                if let Ok(line) = serde_json::to_string(&envelope) {
                    println!("{line}");
                }
                continue;
            }
            match &envelope.event {
                EngineEvent::BrowseResults { pagination, .. } if engine.view() == ViewMode::Home => {
                    print!("{}", card_table(&engine.browse_cards(), pagination));
                }
                EngineEvent::FavoritesResults { pagination, .. }
                    if engine.view() == ViewMode::Favorites =>
                {
                    print!("{}", card_table(&engine.favorite_cards(), pagination));
                }
                EngineEvent::DetailOpened {
                    detail,
                    screenshots,
                    favorite,
                } => print!("{}", detail_text(detail, screenshots, favorite)),
                event => {
                    if let Some(line) = event_line(event) {
                        println!("{line}");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gamedeck_catalog::SortKey;
    use gamedeck_test_support::{FakeCatalog, MemoryStore, fixtures};

    use super::*;
    use crate::commands::test_context::context;

    #[test]
    fn parses_every_verb() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(
            parse_line("type  zelda breath "),
            Ok(Some(ShellCommand::Type("zelda breath".into())))
        );
        assert_eq!(
            parse_line("FAVORITES"),
            Ok(Some(ShellCommand::View(ViewMode::Favorites)))
        );
        assert_eq!(
            parse_line("platform clear"),
            Ok(Some(ShellCommand::Platform(String::new())))
        );
        assert_eq!(parse_line("fav 1042"), Ok(Some(ShellCommand::Toggle(GameId(1042)))));
        assert_eq!(parse_line("page 3"), Ok(Some(ShellCommand::Page(3))));
        assert_eq!(parse_line("q"), Ok(Some(ShellCommand::Quit)));
        let Ok(Some(ShellCommand::Sort(ordering))) = parse_line("sort name") else {
            panic!("sort should parse");
        };
        assert_eq!(ordering.key, SortKey::Name);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_line("page 0").is_err());
        assert!(parse_line("fav abc").is_err());
        assert!(parse_line("sort sideways").is_err());
        assert!(parse_line("launch").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn typed_search_is_debounced_through_the_router() {
        let catalog = Arc::new(FakeCatalog::new());
        let ctx = context(&catalog, &Arc::new(MemoryStore::new()));
        let router = spawn_input_router(Arc::clone(&ctx.engine), ctx.engine.config().debounce);

        for text in ["p", "po", "por", "portal"] {
            execute(&ctx, &router, ShellCommand::Type(text.into())).await;
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(catalog.query_calls().is_empty());

        tokio::time::sleep(Duration::from_millis(600)).await;
        let calls = catalog.query_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].search.as_deref(), Some("portal"));
        router.shutdown().await;
    }

    #[tokio::test]
    async fn toggling_inside_favorites_updates_the_view() {
        let catalog = Arc::new(FakeCatalog::new());
        catalog.insert_detail(fixtures::detail(1, "Celeste", &[], &[], None));
        catalog.insert_detail(fixtures::detail(2, "Hades", &[], &[], None));
        let store = Arc::new(MemoryStore::with_value("favorites", r#"["1"]"#));
        let ctx = context(&catalog, &store);
        let router = spawn_input_router(Arc::clone(&ctx.engine), ctx.engine.config().debounce);

        execute(&ctx, &router, ShellCommand::View(ViewMode::Favorites)).await;
        execute(&ctx, &router, ShellCommand::Toggle(GameId(2))).await;
        assert_eq!(ctx.engine.snapshot().favorites.len(), 2);

        execute(&ctx, &router, ShellCommand::Toggle(GameId(1))).await;
        let remaining: Vec<GameId> = ctx
            .engine
            .snapshot()
            .favorites
            .iter()
            .map(|game| game.id())
            .collect();
        assert_eq!(remaining, vec![GameId(2)]);
        router.shutdown().await;
    }
}
