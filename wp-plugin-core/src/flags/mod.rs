//! # Flag Value Types
//!
//! Custom value types for plugin flags. Every type can be parsed from a single
//! command-line or environment value, so a flag declared with
//! `#[arg(long, env = "PLUGIN_...")]` accepts the same syntax from both
//! sources.

mod deep_string_map;
mod int;
mod map;
mod string_map;
mod string_slice;

use std::collections::BTreeMap;

pub use deep_string_map::DeepStringMap;
pub use int::parse_int;
pub use map::Map;
pub use string_map::StringMap;
pub use string_slice::{DEFAULT_DELIMITER, DEFAULT_ESCAPE, StringSlice, StringSliceParser, split_escaped};
use thiserror::Error;

/// Errors raised while parsing flag values.
#[derive(Debug, Error)]
pub enum FlagError {
  #[error("invalid JSON map '{input}': {source}")]
  InvalidJson {
    input: String,
    #[source]
    source: serde_json::Error,
  },
  #[error("invalid integer '{input}': {source}")]
  InvalidInt {
    input: String,
    #[source]
    source: std::num::ParseIntError,
  },
}

/// Encode a map as JSON, or an empty string when there is nothing to encode.
///
/// `BTreeMap` keeps keys sorted, so the output is stable across runs.
pub(crate) fn map_to_json<V: serde::Serialize>(map: &BTreeMap<String, V>) -> String {
  if map.is_empty() {
    return String::new();
  }

  serde_json::to_string(map).unwrap_or_default()
}
