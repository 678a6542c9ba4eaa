use super::FlagError;

/// Parse a base-10 integer, treating an empty value as `0`.
///
/// CI systems often export numeric variables as empty strings (for example
/// `CI_COMMIT_PULL_REQUEST` outside of pull request pipelines), so numeric
/// metadata flags use this instead of the stock integer parser.
///
/// ```
/// use wp_plugin_core::parse_int;
///
/// assert_eq!(parse_int("").unwrap(), 0);
/// assert_eq!(parse_int("42").unwrap(), 42);
/// assert!(parse_int("forty-two").is_err());
/// ```
pub fn parse_int(input: &str) -> Result<i64, FlagError> {
  if input.is_empty() {
    return Ok(0);
  }

  input.parse().map_err(|source| FlagError::InvalidInt {
    input: input.to_string(),
    source,
  })
}

#[cfg(test)]
mod tests {
  use clap::Parser;

  use super::*;

  #[test]
  fn parses_signed_values() {
    assert_eq!(parse_int("7").unwrap(), 7);
    assert_eq!(parse_int("-12").unwrap(), -12);
    assert_eq!(parse_int("0").unwrap(), 0);
  }

  #[test]
  fn rejects_invalid_values() {
    assert!(parse_int("1.5").is_err());
    assert!(parse_int(" 1").is_err());
    assert!(parse_int("abc").is_err());
  }

  #[derive(Debug, Parser)]
  struct TestCli {
    #[arg(long, value_parser = parse_int, default_value = "")]
    number: i64,
  }

  #[test]
  fn works_as_clap_value_parser() {
    assert_eq!(TestCli::try_parse_from(["test"]).unwrap().number, 0);
    assert_eq!(TestCli::try_parse_from(["test", "--number", "10"]).unwrap().number, 10);
    assert!(TestCli::try_parse_from(["test", "--number", "ten"]).is_err());
  }
}
