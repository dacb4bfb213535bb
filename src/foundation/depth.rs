//! Helpers for walking and decoding node trees of unbounded depth.
//!
//! Design trees nest as deep as their authors make them. Recursion over them runs on a stack
//! that grows on demand, and JSON decoding runs without `serde_json`'s fixed nesting limit.

use serde::de::DeserializeOwned;

// Remaining stack below which a new segment is allocated, and the size of that segment.
const RED_ZONE: usize = 128 * 1024;
const SEGMENT: usize = 2 * 1024 * 1024;

/// Runs `f`, first moving to a fresh stack segment if the current one is nearly exhausted.
pub(crate) fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// Parses JSON with no nesting limit. Trailing non-whitespace is an error.
pub(crate) fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Deserializes `T` out of an already parsed value, growing the stack as needed.
pub(crate) fn from_value<'de, T: serde::Deserialize<'de>>(
    value: &'de serde_json::Value,
) -> serde_json::Result<T> {
    T::deserialize(serde_stacker::Deserializer::new(value))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/depth.rs"]
mod tests;
