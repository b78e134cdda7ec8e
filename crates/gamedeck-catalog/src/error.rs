//! Error types for catalog collaborators and persistence.

use std::error::Error;

use thiserror::Error;

use crate::model::GameId;

/// Failures surfaced by the remote catalog, detail and metadata clients.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure or non-success status from the remote service.
    #[error("catalog request failed: {message}")]
    Network {
        /// HTTP status when the server answered at all.
        status: Option<u16>,
        /// Human-readable failure detail.
        message: String,
    },
    /// The requested game does not exist.
    #[error("game {id} not found")]
    NotFound {
        /// Missing game identifier.
        id: GameId,
    },
    /// The response body could not be decoded.
    #[error("catalog payload could not be decoded: {message}")]
    Decode {
        /// Decoder failure detail.
        message: String,
    },
}

impl CatalogError {
    /// Construct a transport-level failure without a status code.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }

    /// Construct a failure for a non-success HTTP status.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Network {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Whether the failure means the resource is absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience alias for catalog collaborator results.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures raised by a persistence port.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading the stored value failed.
    #[error("failed to read persisted key {key}")]
    Read {
        /// Storage key being read.
        key: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Writing the value failed.
    #[error("failed to write persisted key {key}")]
    Write {
        /// Storage key being written.
        key: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

/// Convenience alias for persistence results.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Error returned when an ordering parameter is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ordering '{input}'")]
pub struct ParseOrderingError {
    /// Raw input that failed to parse.
    pub input: String,
}
