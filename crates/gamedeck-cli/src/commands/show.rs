use gamedeck_events::{EngineEvent, Indicator};

use crate::cli::GameArgs;
use crate::client::{AppContext, CliResult};
use crate::output::render_detail;

pub(crate) async fn handle_show(ctx: &AppContext, args: GameArgs) -> CliResult<()> {
    let mut events = ctx.engine.subscribe();
    let detail = ctx.engine.open_detail(args.id).await?;
    let (screenshots, favorite) = events
        .drain()
        .into_iter()
        .find_map(|event| match event {
            EngineEvent::DetailOpened {
                screenshots,
                favorite,
                ..
            } => Some((screenshots, favorite)),
            _ => None,
        })
        .unwrap_or_else(|| {
            let active = ctx.engine.favorites().is_favorite(args.id);
            (Vec::new(), Indicator::for_membership(active))
        });
    render_detail(&detail, &screenshots, &favorite, ctx.output)
}
