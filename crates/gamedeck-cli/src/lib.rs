#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub, unused)]
#![allow(clippy::redundant_pub_crate)]

//! Terminal front end for the gamedeck catalog engine.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `commands/`: command handlers grouped by concern
//! - `client.rs`: errors and the engine wiring shared by commands
//! - `rawg.rs`: HTTP adapter for the catalog API
//! - `store.rs`: file-backed persistence for favorites
//! - `output.rs`: renderers and formatting helpers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod output;
pub mod rawg;
pub mod store;

pub use cli::run;
pub use rawg::RawgClient;
pub use store::FileStore;
