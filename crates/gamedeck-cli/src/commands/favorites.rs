use anyhow::anyhow;
use gamedeck_engine::ViewMode;
use serde_json::json;

use crate::cli::{BrowseArgs, GameArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{event_line, render_cards};

pub(crate) async fn handle_favorites_list(ctx: &AppContext, args: BrowseArgs) -> CliResult<()> {
    let engine = &ctx.engine;
    if args.narrows_by_option() {
        engine.load_filter_options().await;
    }
    engine.enter_view(ViewMode::Favorites).await;
    engine.set_filter(args.patch()).await;
    if args.page > 1 {
        engine.set_page(args.page).await;
    }

    let snapshot = engine.snapshot();
    render_cards(
        &engine.favorite_cards(),
        &snapshot.favorites_pagination,
        ctx.output,
    )
}

pub(crate) async fn handle_favorites_toggle(ctx: &AppContext, args: GameArgs) -> CliResult<()> {
    let mut events = ctx.engine.subscribe();
    let outcome = ctx.engine.toggle_favorite(args.id).await;
    if !outcome.changed {
        return Err(CliError::failure(anyhow!(
            "favorites could not be saved; game {} left unchanged",
            args.id
        )));
    }

    match ctx.output {
        OutputFormat::Json => {
            println!(
                "{}",
                json!({"id": outcome.id, "favorite": outcome.now_favorite})
            );
        }
        OutputFormat::Table => {
            for line in events.drain().iter().filter_map(event_line) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_favorites_clear(ctx: &AppContext) -> CliResult<()> {
    let before = ctx.engine.favorites().count();
    let removed = ctx.engine.clear_favorites();
    if removed.len() != before {
        return Err(CliError::failure(anyhow!("favorites could not be cleared")));
    }
    match ctx.output {
        OutputFormat::Json => println!("{}", json!({"removed": removed.len()})),
        OutputFormat::Table => println!("Removed {} favorites", removed.len()),
    }
    Ok(())
}
