//! Shared error types and the application context handed to commands.

use std::env;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use gamedeck_catalog::{CatalogError, PersistencePort};
use gamedeck_engine::{CatalogEngine, Collaborators, EngineConfig};
use url::Url;

use crate::cli::{Cli, OutputFormat};
use crate::rawg::RawgClient;
use crate::store::FileStore;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        if err.is_not_found() {
            Self::Validation(err.to_string())
        } else {
            Self::Failure(anyhow::Error::new(err))
        }
    }
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) engine: Arc<CatalogEngine>,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Wire the engine to the HTTP adapter and the file store.
    pub(crate) fn from_cli(cli: &Cli) -> CliResult<Self> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        if api_key.is_none() {
            tracing::warn!("no API key configured; the catalog may reject requests");
        }
        let client = RawgClient::new(
            cli.api_url.clone(),
            api_key,
            Duration::from_secs(cli.timeout),
        )
        .map_err(CliError::failure)?;

        let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
        let store = FileStore::in_data_dir(&data_dir);
        tracing::debug!(path = %store.path().display(), "using favorites storage");

        let collaborators =
            Collaborators::from_client(&Arc::new(client), Arc::new(store) as Arc<dyn PersistencePort>);
        Self::new(collaborators, cli.output)
    }

    pub(crate) fn new(collaborators: Collaborators, output: OutputFormat) -> CliResult<Self> {
        let engine = CatalogEngine::new(collaborators, EngineConfig::default())
            .map_err(|err| CliError::failure(anyhow!("invalid engine configuration: {err}")))?;
        Ok(Self {
            engine: Arc::new(engine),
            output,
        })
    }
}

/// Parse the catalog base URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    let url = input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))?;
    if url.cannot_be_a_base() {
        return Err(format!("invalid URL '{input}': must be an http(s) base URL"));
    }
    Ok(url)
}

/// `$XDG_DATA_HOME`, then `$HOME/.local/share`, then the working directory.
pub(crate) fn default_data_dir() -> PathBuf {
    env::var_os("XDG_DATA_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
