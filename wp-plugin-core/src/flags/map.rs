use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{FlagError, map_to_json};

/// A string map that only accepts valid JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Map(BTreeMap<String, String>);

impl Map {
  pub fn into_inner(self) -> BTreeMap<String, String> {
    self.0
  }
}

impl FromStr for Map {
  type Err = FlagError;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    if input.is_empty() {
      return Ok(Self::default());
    }

    serde_json::from_str(input)
      .map(Self)
      .map_err(|source| FlagError::InvalidJson {
        input: input.to_string(),
        source,
      })
  }
}

impl fmt::Display for Map {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&map_to_json(&self.0))
  }
}

impl Deref for Map {
  type Target = BTreeMap<String, String>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl From<BTreeMap<String, String>> for Map {
  fn from(map: BTreeMap<String, String>) -> Self {
    Self(map)
  }
}
