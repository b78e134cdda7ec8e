//! Engine tuning knobs.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key holding the favorite id set.
pub const FAVORITES_KEY: &str = "favorites";

/// Errors raised when an [`EngineConfig`] is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A field contained an unusable value.
    #[error("invalid engine configuration field {field}: {reason}")]
    InvalidField {
        /// Offending field.
        field: &'static str,
        /// Machine-readable reason.
        reason: &'static str,
    },
}

/// Result alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime configuration for [`crate::CatalogEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Games requested per browse page.
    pub browse_page_size: u32,
    /// Games shown per favorites page.
    pub favorites_page_size: u32,
    /// Quiescence window for search input.
    pub debounce: Duration,
    /// Maximum platform options kept for the filter list.
    pub platform_option_cap: usize,
    /// Maximum genre options kept for the filter list.
    pub genre_option_cap: usize,
    /// Persistence key for the favorite id set.
    pub favorites_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            browse_page_size: 20,
            favorites_page_size: 10,
            debounce: Duration::from_millis(500),
            platform_option_cap: 50,
            genre_option_cap: 15,
            favorites_key: FAVORITES_KEY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Check that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] for zero page sizes, a zero
    /// debounce window or an empty storage key.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.browse_page_size == 0 {
            return Err(invalid("browse_page_size", "must be positive"));
        }
        if self.favorites_page_size == 0 {
            return Err(invalid("favorites_page_size", "must be positive"));
        }
        if self.debounce.is_zero() {
            return Err(invalid("debounce", "must be positive"));
        }
        if self.favorites_key.trim().is_empty() {
            return Err(invalid("favorites_key", "must not be empty"));
        }
        Ok(())
    }
}

const fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidField { field, reason }
}
