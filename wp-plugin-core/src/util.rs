//! Miscellaneous helpers.

use std::path::PathBuf;

use directories::BaseDirs;

/// Home directory used when the current user's cannot be determined. Plugin
/// containers usually run as root.
const FALLBACK_HOME: &str = "/root";

/// The current user's home directory.
pub fn user_home_dir() -> PathBuf {
  BaseDirs::new()
    .map(|dirs| dirs.home_dir().to_path_buf())
    .unwrap_or_else(|| PathBuf::from(FALLBACK_HOME))
}

#[cfg(test)]
mod tests {
  use wp_plugin_test_utils::HomeEnvTestGuard;

  use super::*;

  #[cfg(unix)]
  #[test]
  fn follows_home_variable() {
    let home = HomeEnvTestGuard::new();
    assert_eq!(user_home_dir(), home.home_dir());
  }

  #[test]
  fn is_never_empty() {
    assert!(!user_home_dir().as_os_str().is_empty());
  }
}
