//! Argument parsing and command dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use gamedeck_catalog::{FilterPatch, GameId, Ordering};
use gamedeck_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, command_span, init_logging,
};
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, parse_url};
use crate::commands::{
    favorites::{handle_favorites_clear, handle_favorites_list, handle_favorites_toggle},
    filters::handle_filters,
    games::handle_games,
    shell::handle_shell,
    show::handle_show,
};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_API_URL: &str = "https://api.rawg.io/api";

/// Parses CLI arguments, runs the requested command and returns the process
/// exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: option_env!("GAMEDECK_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let command_name = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();
    let span = command_span(command_name, &trace_id);

    match dispatch(cli).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let ctx = AppContext::from_cli(&cli)?;
    match cli.command {
        Command::Games(args) => handle_games(&ctx, args).await,
        Command::Favorites(favorites) => match favorites {
            FavoritesCommand::List(args) => handle_favorites_list(&ctx, args).await,
            FavoritesCommand::Toggle(args) => handle_favorites_toggle(&ctx, args).await,
            FavoritesCommand::Clear => handle_favorites_clear(&ctx),
        },
        Command::Show(args) => handle_show(&ctx, args).await,
        Command::Filters => handle_filters(&ctx).await,
        Command::Shell => handle_shell(&ctx).await,
    }
}

#[derive(Parser)]
#[command(
    name = "gamedeck",
    about = "Browse the game catalog and manage favorites from the terminal"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "GAMEDECK_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    pub(crate) api_url: Url,
    #[arg(long, global = true, env = "GAMEDECK_API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<String>,
    #[arg(
        long,
        global = true,
        env = "GAMEDECK_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "GAMEDECK_DATA_DIR",
        help = "Directory holding gamedeck/storage.json"
    )]
    pub(crate) data_dir: Option<std::path::PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, global = true, env = "GAMEDECK_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log_level: String,
    #[arg(long, global = true, value_parser = parse_log_format)]
    pub(crate) log_format: Option<LogFormat>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Browse the remote catalog.
    Games(BrowseArgs),
    /// Manage saved favorites.
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Show one game in detail.
    Show(GameArgs),
    /// List platform and genre filter options.
    Filters,
    /// Interactive session with live search.
    Shell,
}

#[derive(Subcommand)]
pub(crate) enum FavoritesCommand {
    /// List favorites with local filtering and paging.
    List(BrowseArgs),
    /// Add or remove a game.
    Toggle(GameArgs),
    /// Remove every favorite.
    Clear,
}

#[derive(Args, Default)]
pub(crate) struct BrowseArgs {
    #[arg(long, short = 's', help = "Match game names")]
    pub(crate) search: Option<String>,
    #[arg(long, help = "Platform option id")]
    pub(crate) platform: Option<String>,
    #[arg(long, help = "Genre option id")]
    pub(crate) genre: Option<String>,
    #[arg(
        long,
        value_parser = parse_ordering,
        help = "Sort order: name, -rating, -released, ..."
    )]
    pub(crate) sort: Option<Ordering>,
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) page: u32,
}

impl BrowseArgs {
    pub(crate) fn patch(&self) -> FilterPatch {
        FilterPatch {
            search: self.search.clone(),
            platform_id: self.platform.clone(),
            genre_id: self.genre.clone(),
            ordering: self.sort,
        }
    }

    pub(crate) const fn narrows_by_option(&self) -> bool {
        self.platform.is_some() || self.genre.is_some()
    }
}

#[derive(Args)]
pub(crate) struct GameArgs {
    #[arg(help = "Game identifier")]
    pub(crate) id: GameId,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub(crate) fn parse_ordering(input: &str) -> Result<Ordering, String> {
    input.parse::<Ordering>().map_err(|err| err.to_string())
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Games(_) => "games",
        Command::Favorites(FavoritesCommand::List(_)) => "favorites_list",
        Command::Favorites(FavoritesCommand::Toggle(_)) => "favorites_toggle",
        Command::Favorites(FavoritesCommand::Clear) => "favorites_clear",
        Command::Show(_) => "show",
        Command::Filters => "filters",
        Command::Shell => "shell",
    }
}
