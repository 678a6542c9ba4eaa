use std::ffi::OsStr;
use std::fmt;
use std::ops::Deref;

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;

/// Delimiter used when a flag does not configure one.
pub const DEFAULT_DELIMITER: &str = ",";

/// Escape sequence used when a flag does not configure one.
pub const DEFAULT_ESCAPE: &str = "\\";

/// Split `input` at `delimiter`, keeping delimiters that are preceded by
/// `escape` as part of the value.
///
/// An empty input produces an empty list. An empty delimiter keeps the input
/// as a single value, and an empty escape disables escaping.
///
/// ```
/// use wp_plugin_core::flags::split_escaped;
///
/// assert_eq!(split_escaped("a,b", ",", "\\"), vec!["a", "b"]);
/// assert_eq!(split_escaped(",a\\,", ",", "\\"), vec!["", "a,"]);
/// ```
pub fn split_escaped(input: &str, delimiter: &str, escape: &str) -> Vec<String> {
  if input.is_empty() {
    return Vec::new();
  }

  if delimiter.is_empty() {
    return vec![input.to_string()];
  }

  let mut parts: Vec<String> = input.split(delimiter).map(str::to_string).collect();
  if escape.is_empty() {
    return parts;
  }

  // Walk backwards so a merged piece can absorb further escaped delimiters.
  for i in (0..parts.len().saturating_sub(1)).rev() {
    if let Some(stripped) = parts[i].strip_suffix(escape).map(str::to_string) {
      let next = parts.remove(i + 1);
      parts[i] = format!("{stripped}{delimiter}{next}");
    }
  }

  parts
}

/// A list of strings parsed from a single delimited value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringSlice {
  values: Vec<String>,
  delimiter: String,
}

impl StringSlice {
  /// Wrap already split values; `delimiter` is used when displaying them.
  pub fn new(values: Vec<String>, delimiter: impl Into<String>) -> Self {
    Self {
      values,
      delimiter: delimiter.into(),
    }
  }

  /// The parsed values.
  pub fn as_slice(&self) -> &[String] {
    &self.values
  }

  /// Consume the wrapper and return the parsed values.
  pub fn into_inner(self) -> Vec<String> {
    self.values
  }

  /// Quoted, delimiter-joined form used as a flag's default text.
  ///
  /// ```
  /// use wp_plugin_core::StringSlice;
  ///
  /// let values = vec!["a".to_string(), "b".to_string()];
  /// assert_eq!(StringSlice::default_text(&values, ";"), "\"a;b\"");
  /// assert_eq!(StringSlice::default_text(&[], ","), "");
  /// ```
  pub fn default_text(values: &[String], delimiter: &str) -> String {
    if values.is_empty() {
      return String::new();
    }

    format!("{:?}", values.join(delimiter))
  }
}

impl Default for StringSlice {
  fn default() -> Self {
    Self::new(Vec::new(), DEFAULT_DELIMITER)
  }
}

impl Deref for StringSlice {
  type Target = [String];

  fn deref(&self) -> &Self::Target {
    &self.values
  }
}

impl fmt::Display for StringSlice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.values.join(&self.delimiter))
  }
}

impl From<StringSlice> for Vec<String> {
  fn from(slice: StringSlice) -> Self {
    slice.values
  }
}

/// Value parser for [`StringSlice`] flags with a configurable delimiter and
/// escape sequence.
///
/// ```
/// use clap::Parser;
/// use wp_plugin_core::{StringSlice, StringSliceParser};
///
/// #[derive(Parser)]
/// struct Cli {
///   #[arg(long, value_parser = StringSliceParser::new(";", "#"), default_value = "")]
///   tags: StringSlice,
/// }
///
/// let cli = Cli::parse_from(["cli", "--tags", "a;b#;c"]);
/// assert_eq!(cli.tags.as_slice(), ["a", "b;c"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringSliceParser {
  delimiter: String,
  escape: String,
}

impl StringSliceParser {
  pub fn new(delimiter: impl Into<String>, escape: impl Into<String>) -> Self {
    Self {
      delimiter: delimiter.into(),
      escape: escape.into(),
    }
  }

  pub fn delimiter(&self) -> &str {
    &self.delimiter
  }

  pub fn escape(&self) -> &str {
    &self.escape
  }

  /// Parse a raw value with this parser's configuration.
  pub fn parse(&self, input: &str) -> StringSlice {
    StringSlice::new(split_escaped(input, &self.delimiter, &self.escape), self.delimiter.clone())
  }
}

impl Default for StringSliceParser {
  fn default() -> Self {
    Self::new(DEFAULT_DELIMITER, DEFAULT_ESCAPE)
  }
}

impl TypedValueParser for StringSliceParser {
  type Value = StringSlice;

  fn parse_ref(&self, cmd: &clap::Command, _arg: Option<&clap::Arg>, value: &OsStr) -> Result<Self::Value, clap::Error> {
    let Some(value) = value.to_str() else {
      return Err(clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd));
    };

    Ok(self.parse(value))
  }
}

#[cfg(test)]
mod tests {
  use clap::Parser;

  use super::*;

  fn split(input: &str) -> Vec<String> {
    split_escaped(input, DEFAULT_DELIMITER, DEFAULT_ESCAPE)
  }

  #[test]
  fn split_empty_string() {
    assert!(split("").is_empty());
  }

  #[test]
  fn split_simple_values() {
    assert_eq!(split("a,b"), vec!["a", "b"]);
  }

  #[test]
  fn split_keeps_empty_values() {
    assert_eq!(split(",,,"), vec!["", "", "", ""]);
  }

  #[test]
  fn split_escaped_delimiter() {
    assert_eq!(split(",a\\,"), vec!["", "a,"]);
  }

  #[test]
  fn split_leaves_inner_backslashes_alone() {
    assert_eq!(split("a,b\\,c\\\\d,e"), vec!["a", "b,c\\\\d", "e"]);
  }

  #[test]
  fn split_consecutive_escapes_merge_into_one_value() {
    assert_eq!(split("a\\,b\\,c,d"), vec!["a,b,c", "d"]);
  }

  #[test]
  fn split_custom_delimiter_and_escape() {
    assert_eq!(split_escaped("a;b#;c", ";", "#"), vec!["a", "b;c"]);
  }

  #[test]
  fn split_without_delimiter_keeps_input() {
    assert_eq!(split_escaped("a,b", "", "\\"), vec!["a,b"]);
  }

  #[test]
  fn split_without_escape_ignores_backslashes() {
    assert_eq!(split_escaped("a\\,b", ",", ""), vec!["a\\", "b"]);
  }

  #[test]
  fn display_joins_with_delimiter() {
    let empty = StringSlice::default();
    assert_eq!(empty.to_string(), "");

    let single = StringSlice::new(vec!["a".into()], ",");
    assert_eq!(single.to_string(), "a");

    let many = StringSlice::new(vec!["a".into(), "b".into(), "c".into()], ",");
    assert_eq!(many.to_string(), "a,b,c");

    let with_commas = StringSlice::new(vec!["a,b".into(), "c".into()], ",");
    assert_eq!(with_commas.to_string(), "a,b,c");
  }

  #[test]
  fn default_text_is_quoted() {
    let values: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
    assert_eq!(StringSlice::default_text(&[], ","), "");
    assert_eq!(StringSlice::default_text(&values[..1], ","), "\"a\"");
    assert_eq!(StringSlice::default_text(&values, ","), "\"a,b,c\"");
    assert_eq!(StringSlice::default_text(&values, ";"), "\"a;b;c\"");
  }

  #[test]
  fn parser_keeps_configuration() {
    let parser = StringSliceParser::new(";", "#");
    assert_eq!(parser.delimiter(), ";");
    assert_eq!(parser.escape(), "#");

    let parsed = parser.parse("a;b");
    assert_eq!(parsed.as_slice(), ["a", "b"]);
    assert_eq!(parsed.to_string(), "a;b");
  }

  #[derive(Debug, Parser)]
  struct TestCli {
    #[arg(long, value_parser = StringSliceParser::default(), default_value = "")]
    tags: StringSlice,
  }

  #[test]
  fn parses_from_command_line() {
    let cli = TestCli::try_parse_from(["test", "--tags", "1.0,latest\\,edge"]).unwrap();
    assert_eq!(cli.tags.as_slice(), ["1.0", "latest,edge"]);
  }

  #[test]
  fn empty_default_parses_to_empty_slice() {
    let cli = TestCli::try_parse_from(["test"]).unwrap();
    assert!(cli.tags.is_empty());
  }
}
