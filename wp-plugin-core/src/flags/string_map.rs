use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::map_to_json;

/// Key used when a value is not a JSON object.
pub const WILDCARD_KEY: &str = "*";

/// A string map that accepts JSON objects and falls back to storing any other
/// value under the `"*"` key.
///
/// Parsing never fails, which makes it a good fit for flags such as
/// `PLUGIN_ENVIRONMENT` where a plain string should still be usable.
///
/// ```
/// use wp_plugin_core::StringMap;
///
/// let map: StringMap = r#"{"key":"value"}"#.parse().unwrap();
/// assert_eq!(map.get("key").map(String::as_str), Some("value"));
///
/// let fallback: StringMap = "plain".parse().unwrap();
/// assert_eq!(fallback.get("*").map(String::as_str), Some("plain"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringMap(BTreeMap<String, String>);

impl StringMap {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn into_inner(self) -> BTreeMap<String, String> {
    self.0
  }
}

impl FromStr for StringMap {
  type Err = Infallible;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    if input.is_empty() {
      return Ok(Self::default());
    }

    match serde_json::from_str::<BTreeMap<String, String>>(input) {
      Ok(map) => Ok(Self(map)),
      Err(_) => Ok(Self(BTreeMap::from([(WILDCARD_KEY.to_string(), input.to_string())]))),
    }
  }
}

impl fmt::Display for StringMap {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&map_to_json(&self.0))
  }
}

impl Deref for StringMap {
  type Target = BTreeMap<String, String>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for StringMap {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<BTreeMap<String, String>> for StringMap {
  fn from(map: BTreeMap<String, String>) -> Self {
    Self(map)
  }
}

impl FromIterator<(String, String)> for StringMap {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
