use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while bootstrapping a plugin.
#[derive(Debug, Error)]
pub enum PluginError {
  /// Invalid command line or environment, including `--help` and `--version`
  /// requests which clap reports as errors.
  #[error(transparent)]
  Args(#[from] clap::Error),
  #[error("unknown logging level: {0}")]
  UnknownLogLevel(String),
  #[error("failed to load env file {}: {source}", path.display())]
  EnvFile {
    path: PathBuf,
    #[source]
    source: dotenvy::Error,
  },
  #[error("failed to build HTTP client: {0}")]
  HttpClient(#[source] reqwest::Error),
  #[error("failed to start async runtime: {0}")]
  Runtime(#[source] std::io::Error),
}
