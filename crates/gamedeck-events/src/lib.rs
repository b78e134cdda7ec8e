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

//! Event bus for the gamedeck state engine.
//!
//! The engine never touches presentation directly: every state change is
//! published as a typed [`EngineEvent`] and a render layer subscribes. The bus
//! wraps `tokio::broadcast` and stamps each event with a sequential id and a
//! timestamp.

pub mod bus;
pub mod payloads;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, EventBus, EventId, EventStream};
pub use payloads::{
    EngineEvent, EventEnvelope, Indicator, IndicatorUpdate, NotificationLevel, PaginationView,
    Surface, ViewMode,
};
