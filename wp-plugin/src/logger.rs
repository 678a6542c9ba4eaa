//! # Console Logging
//!
//! Plugins log to stdout so their output interleaves with the traced commands
//! they run. Timestamps are left out since the CI log viewer adds its own.

use std::io::{self, IsTerminal};

use clap::Args;
use tracing::level_filters::LevelFilter;
use tracing::{Subscriber, debug};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::error::PluginError;
use crate::headings;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Args)]
#[command(next_help_heading = headings::PLUGIN)]
pub struct LoggingArgs {
  /// plugin log level
  #[arg(id = "log-level", long = "log-level", env = "PLUGIN_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
  pub log_level: String,
}

impl Default for LoggingArgs {
  fn default() -> Self {
    Self {
      log_level: DEFAULT_LOG_LEVEL.to_string(),
    }
  }
}

/// Parse a level name. `fatal` and `panic` map to `error`, `disabled` turns
/// logging off.
pub fn parse_level(level: &str) -> Result<LevelFilter, PluginError> {
  let filter = match level.trim().to_ascii_lowercase().as_str() {
    "trace" => LevelFilter::TRACE,
    "debug" => LevelFilter::DEBUG,
    "info" | "" => LevelFilter::INFO,
    "warn" | "warning" => LevelFilter::WARN,
    "error" | "fatal" | "panic" => LevelFilter::ERROR,
    "disabled" | "off" => LevelFilter::OFF,
    _ => return Err(PluginError::UnknownLogLevel(level.to_string())),
  };

  Ok(filter)
}

/// Install the console logger for `args.log_level` and return the level.
///
/// Only the first call installs a subscriber, later calls just parse the level.
pub fn setup_console_logger(args: &LoggingArgs) -> Result<LevelFilter, PluginError> {
  let level = parse_level(&args.log_level)?;
  init_tracing(level);

  if level >= LevelFilter::DEBUG {
    debug!(level = %level, "Log level configured");
  }

  Ok(level)
}

pub(crate) fn init_tracing(level: LevelFilter) {
  let filter = EnvFilter::default().add_directive(level.into());

  tracing_subscriber::registry()
    .with(filter)
    .with(console_layer(level, io::stdout, io::stdout().is_terminal()))
    .try_init()
    .ok();
}

/// Source locations are only printed at debug and trace level.
fn console_layer<S, W>(level: LevelFilter, writer: W, ansi: bool) -> impl Layer<S>
where
  S: Subscriber + for<'a> LookupSpan<'a>,
  W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
  let verbose = level >= LevelFilter::DEBUG;

  fmt::layer()
    .without_time()
    .with_writer(writer)
    .with_ansi(ansi)
    .with_target(false)
    .with_level(true)
    .with_file(verbose)
    .with_line_number(verbose)
}
