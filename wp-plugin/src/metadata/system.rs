use clap::Args;
use serde::Serialize;

use crate::headings;

/// Flags describing the CI system itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args, Serialize)]
#[command(next_help_heading = headings::SYSTEM)]
pub struct System {
  /// system name
  #[arg(id = "system.name", long = "system.name", env = "CI_SYSTEM_NAME", default_value = "")]
  pub name: String,

  /// system host
  #[arg(id = "system.host", long = "system.host", env = "CI_SYSTEM_HOST", default_value = "")]
  pub host: String,

  /// system url
  #[arg(id = "system.url", long = "system.url", env = "CI_SYSTEM_URL", default_value = "")]
  pub url: String,

  /// system arch
  #[arg(id = "system.arch", long = "system.arch", env = "CI_SYSTEM_PLATFORM", default_value = "")]
  pub platform: String,

  /// system version
  #[arg(id = "system.version", long = "system.version", env = "CI_SYSTEM_VERSION", default_value = "")]
  pub version: String,
}
