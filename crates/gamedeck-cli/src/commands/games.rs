use anyhow::anyhow;
use gamedeck_engine::ViewMode;

use crate::cli::BrowseArgs;
use crate::client::{AppContext, CliError, CliResult};
use crate::output::render_cards;

pub(crate) async fn handle_games(ctx: &AppContext, args: BrowseArgs) -> CliResult<()> {
    let engine = &ctx.engine;
    engine.set_filter(args.patch()).await;
    if args.page > 1 {
        engine.set_page(args.page).await;
    } else {
        engine.enter_view(ViewMode::Home).await;
    }

    let snapshot = engine.snapshot();
    if let Some(error) = snapshot.error {
        return Err(CliError::failure(anyhow!(error)));
    }
    render_cards(&engine.browse_cards(), &snapshot.browse_pagination, ctx.output)
}
