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

//! Transport-agnostic game catalog types and collaborator interfaces.
//!
//! Layout: `model/` (summaries, details, filters, query specs), `service/`
//! (catalog, detail, metadata and persistence traits), `error.rs` (failure
//! taxonomy shared by adapters and the engine).

pub mod error;
pub mod model;
pub mod service;

pub use error::{
    CatalogError, CatalogResult, ParseOrderingError, PersistenceError, PersistenceResult,
};
pub use model::{
    CatalogPage, FilterPatch, FilterState, GameDetail, GameId, GameSummary, NamedRef, Ordering,
    PlatformEntry, QuerySpec, Screenshot, SortKey,
};
pub use service::{CatalogClient, DetailClient, MetadataClient, PersistencePort};
