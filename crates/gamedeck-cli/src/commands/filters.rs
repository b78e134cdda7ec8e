use crate::client::{AppContext, CliResult};
use crate::output::render_options;

pub(crate) async fn handle_filters(ctx: &AppContext) -> CliResult<()> {
    ctx.engine.load_filter_options().await;
    let (platforms, genres) = ctx.engine.filter_options();
    if platforms.is_empty() && genres.is_empty() {
        tracing::warn!("no filter options available");
    }
    render_options(&platforms, &genres, ctx.output)
}
