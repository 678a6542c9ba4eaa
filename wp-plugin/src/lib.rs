//! # Plugin Bootstrap
//!
//! Everything a CI plugin binary needs before doing its actual work: flags
//! bound to the CI environment, typed pipeline metadata, console logging and
//! a preconfigured HTTP client.
//!
//! ```no_run
//! use clap::Args;
//! use wp_plugin::{Options, Plugin};
//!
//! #[derive(Debug, Args)]
//! struct Settings {
//!   /// greeting to print
//!   #[arg(long = "message", env = "PLUGIN_MESSAGE", default_value = "hello")]
//!   message: String,
//! }
//!
//! fn main() -> std::process::ExitCode {
//!   Plugin::<Settings>::new(Options::new("greeter", env!("CARGO_PKG_VERSION"))).run(|ctx| async move {
//!     tracing::info!(message = %ctx.settings.message, repo = %ctx.metadata.repository.slug, "Greeting");
//!     Ok::<_, anyhow::Error>(())
//!   })
//! }
//! ```

pub mod environment;
pub mod error;
pub mod logger;
pub mod metadata;
pub mod network;
pub mod plugin;

pub use environment::Environment;
pub use error::PluginError;
pub use metadata::Metadata;
pub use network::Network;
pub use plugin::{Options, Plugin, PluginArgs, PluginContext};

/// Help headings used to group flags in `--help` output and generated docs.
pub mod headings {
  pub const REPOSITORY: &str = "Woodpecker Repository Flags";
  pub const PIPELINE: &str = "Woodpecker Pipeline Flags";
  pub const COMMIT: &str = "Woodpecker Commit Flags";
  pub const STEP: &str = "Woodpecker Step Flags";
  pub const SYSTEM: &str = "Woodpecker System Flags";
  pub const PLUGIN: &str = "Plugin Flags";
}
