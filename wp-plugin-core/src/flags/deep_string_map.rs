use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::string_map::WILDCARD_KEY;
use super::{FlagError, map_to_json};

/// A two-level string map, e.g. per-registry credentials.
///
/// A single-level JSON object is accepted as well and stored under the `"*"`
/// key, so `{"user":"me"}` and `{"*":{"user":"me"}}` parse to the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeepStringMap(BTreeMap<String, BTreeMap<String, String>>);

impl DeepStringMap {
  pub fn into_inner(self) -> BTreeMap<String, BTreeMap<String, String>> {
    self.0
  }
}

impl FromStr for DeepStringMap {
  type Err = FlagError;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    if input.is_empty() {
      return Ok(Self::default());
    }

    if let Ok(nested) = serde_json::from_str(input) {
      return Ok(Self(nested));
    }

    let single: BTreeMap<String, String> = serde_json::from_str(input).map_err(|source| FlagError::InvalidJson {
      input: input.to_string(),
      source,
    })?;

    Ok(Self(BTreeMap::from([(WILDCARD_KEY.to_string(), single)])))
  }
}

impl fmt::Display for DeepStringMap {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&map_to_json(&self.0))
  }
}

impl Deref for DeepStringMap {
  type Target = BTreeMap<String, BTreeMap<String, String>>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}
