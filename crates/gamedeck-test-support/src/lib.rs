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

//! Shared test helpers used across gamedeck suites.
//! Layout: fixtures.rs (game and page builders), mocks.rs (scripted catalog and
//! in-memory persistence).

pub mod fixtures;
pub mod mocks;

pub use mocks::{FakeCatalog, MemoryStore};
