use std::collections::HashMap;

use tera::{Tera, Value};

/// Capitalize the first character of `s` and terminate it with a period.
///
/// ```
/// use wp_plugin_core::to_sentence;
///
/// assert_eq!(to_sentence("this is a sentence"), "This is a sentence.");
/// assert_eq!(to_sentence("already done."), "Already done.");
/// assert_eq!(to_sentence(""), "");
/// ```
pub fn to_sentence(s: &str) -> String {
  let mut chars = s.chars();
  let Some(first) = chars.next() else {
    return String::new();
  };

  let mut sentence: String = first.to_uppercase().collect();
  sentence.push_str(chars.as_str());
  if !sentence.ends_with('.') {
    sentence.push('.');
  }

  sentence
}

fn to_sentence_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
  let s = value
    .as_str()
    .ok_or_else(|| tera::Error::msg("Filter `to_sentence` was used on a value that isn't a string"))?;

  Ok(Value::String(to_sentence(s)))
}

/// A template engine with the built-in tera filters plus the plugin helpers
/// (`to_sentence`).
pub fn load_tera() -> Tera {
  let mut tera = Tera::default();
  tera.register_filter("to_sentence", to_sentence_filter);
  tera
}

#[cfg(test)]
mod tests {
  use tera::Context;

  use super::*;

  #[test]
  fn to_sentence_cases() {
    assert_eq!(to_sentence(""), "");
    assert_eq!(to_sentence("this is a sentence"), "This is a sentence.");
    assert_eq!(to_sentence("this is a sentence."), "This is a sentence.");
    assert_eq!(to_sentence("word"), "Word.");
  }

  #[test]
  fn to_sentence_handles_multibyte_first_character() {
    assert_eq!(to_sentence("über alles"), "Über alles.");
  }

  #[test]
  fn registered_filter_is_available() {
    let mut tera = load_tera();
    let rendered = tera
      .render_str("{{ summary | to_sentence }}", &Context::from_serialize(serde_json::json!({"summary": "build passed"})).unwrap())
      .unwrap();
    assert_eq!(rendered, "Build passed.");
  }

  #[test]
  fn filter_rejects_non_strings() {
    let mut tera = load_tera();
    let result = tera.render_str("{{ 42 | to_sentence }}", &Context::new());
    assert!(result.is_err());
  }
}
