//! JSON encoding of the persisted favorite id set.
//!
//! The canonical form is an array of decimal id strings in ascending id
//! order, so the stored bytes depend only on the set. Older writers stored
//! bare numbers or whole game objects; those decode to the same id set.

use std::collections::BTreeSet;

use gamedeck_catalog::GameId;
use serde_json::Value;
use thiserror::Error;

/// Reasons a stored favorites document could not be decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload was not JSON.
    #[error("favorites payload is not valid JSON")]
    Json {
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
    /// The payload was JSON but not an array.
    #[error("favorites payload is not an array")]
    NotAnArray,
}

/// Decode a stored favorites document into an ascending, duplicate-free id
/// list.
///
/// Elements that are not recognisable ids are skipped.
///
/// # Errors
///
/// Returns an error when the payload is not a JSON array.
pub fn decode(raw: &str) -> Result<Vec<GameId>, CodecError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| CodecError::Json { source })?;
    let Value::Array(items) = value else {
        return Err(CodecError::NotAnArray);
    };

    let ids: BTreeSet<GameId> = items.iter().filter_map(element_id).collect();
    Ok(ids.into_iter().collect())
}

/// Encode ids in the canonical string-array form.
#[must_use]
pub fn encode(ids: &[GameId]) -> String {
    let ordered: BTreeSet<GameId> = ids.iter().copied().collect();
    Value::Array(
        ordered
            .into_iter()
            .map(|id| Value::String(id.to_string()))
            .collect(),
    )
    .to_string()
}

fn element_id(value: &Value) -> Option<GameId> {
    match value {
        Value::String(raw) => raw.parse().ok(),
        Value::Number(number) => number.as_u64().map(GameId),
        Value::Object(map) => map.get("id").and_then(|inner| match inner {
            Value::Object(_) => None,
            other => element_id(other),
        }),
        _ => None,
    }
}
