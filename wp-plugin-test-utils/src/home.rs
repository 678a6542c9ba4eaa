//! HOME directory management for testing
//!
//! This module provides utilities for isolating the HOME directory during
//! testing to prevent tests from interfering with the user's actual home
//! directory.

use std::path::Path;

use tempfile::TempDir;

use crate::env::EnvVarGuard;

/// Points HOME at a temporary directory for the guard's lifetime
pub struct HomeEnvTestGuard {
  /// The temporary directory that will be used as HOME
  pub temp_dir: TempDir,
  _env: EnvVarGuard,
}

impl Default for HomeEnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl HomeEnvTestGuard {
  /// Create a new test environment with a temporary HOME directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let mut env = EnvVarGuard::new();
    env.set("HOME", temp_dir.path());

    Self { temp_dir, _env: env }
  }

  /// Get the path to the temporary HOME directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
