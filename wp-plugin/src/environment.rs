//! Extra environment variables handed to the plugin as a JSON map.

use std::env;
use std::ops::Deref;

use clap::Args;
use wp_plugin_core::StringMap;

use crate::headings;

#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = headings::PLUGIN)]
pub struct EnvironmentArgs {
  /// plugin environment variables
  #[arg(id = "environment", long = "environment", env = "PLUGIN_ENVIRONMENT", default_value = "")]
  pub environment: StringMap,
}

/// Variables configured for the plugin, layered over the process
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment(StringMap);

impl Environment {
  pub fn new(vars: StringMap) -> Self {
    Self(vars)
  }

  /// Look up `key` in the configured variables, then in the process
  /// environment.
  pub fn lookup(&self, key: &str) -> Option<String> {
    if let Some(value) = self.0.get(key) {
      return Some(value.clone());
    }

    if key.is_empty() {
      return None;
    }
    env::var(key).ok()
  }

  /// The configured variables as `KEY=VALUE` strings.
  pub fn value(&self) -> Vec<String> {
    self.0.iter().map(|(key, value)| format!("{key}={value}")).collect()
  }
}

impl Deref for Environment {
  type Target = StringMap;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl From<EnvironmentArgs> for Environment {
  fn from(args: EnvironmentArgs) -> Self {
    Self(args.environment)
  }
}
