//! # Plugin Runner
//!
//! Ties the flag groups together: the plugin's own settings are flattened
//! next to the metadata, logging, network and environment flags, parsed from
//! the command line and the environment, and handed to the plugin's
//! `execute` callback as a [`PluginContext`].

use std::ffi::OsString;
use std::future::Future;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Command, FromArgMatches};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, warn};
use url::Url;

use crate::environment::{Environment, EnvironmentArgs};
use crate::error::PluginError;
use crate::logger::{self, LoggingArgs};
use crate::metadata::{Metadata, MetadataArgs};
use crate::network::{Network, NetworkArgs};

/// Env file written by the Woodpecker agent for steps to source.
pub const DEFAULT_ENV_FILE: &str = "/run/woodpecker/env";

/// Static information about a plugin.
#[derive(Debug, Clone)]
pub struct Options {
  pub name: String,
  pub description: String,
  pub version: String,
  /// Free form text appended to the version, e.g. the build commit
  pub version_metadata: String,
  /// Dotenv file loaded before parsing, when it exists
  pub env_file: Option<PathBuf>,
}

impl Options {
  pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      description: String::new(),
      version: version.into(),
      version_metadata: String::new(),
      env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
    }
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn version_metadata(mut self, metadata: impl Into<String>) -> Self {
    self.version_metadata = metadata.into();
    self
  }

  pub fn env_file(mut self, path: Option<PathBuf>) -> Self {
    self.env_file = path;
    self
  }
}

/// Every flag a plugin accepts. The plugin's own settings come first.
#[derive(Debug, Clone, Args)]
pub struct PluginArgs<S: Args> {
  #[command(flatten)]
  pub settings: S,
  #[command(flatten)]
  pub metadata: MetadataArgs,
  #[command(flatten)]
  pub logging: LoggingArgs,
  #[command(flatten)]
  pub network: NetworkArgs,
  #[command(flatten)]
  pub environment: EnvironmentArgs,
}

/// Everything the `execute` callback gets to work with.
#[derive(Debug, Clone)]
pub struct PluginContext<S> {
  pub settings: S,
  pub metadata: Metadata,
  pub network: Network,
  pub environment: Environment,
  pub log_level: LevelFilter,
}

/// A plugin with settings of type `S`.
#[derive(Debug, Clone)]
pub struct Plugin<S> {
  options: Options,
  _settings: PhantomData<fn() -> S>,
}

impl<S: Args + FromArgMatches> Plugin<S> {
  pub fn new(options: Options) -> Self {
    Self {
      options,
      _settings: PhantomData,
    }
  }

  pub fn options(&self) -> &Options {
    &self.options
  }

  /// The full command with every flag, also used to generate documentation.
  pub fn command(&self) -> Command {
    let version = format!("version={} {}", self.options.version, self.options.version_metadata);

    let command = Command::new(self.options.name.clone())
      .about(self.options.description.clone())
      .version(version.trim().to_string());

    PluginArgs::<S>::augment_args(command)
  }

  /// Load the env file, parse `args` and set up logging and networking.
  ///
  /// A malformed env file is logged and skipped. Variables on lines before
  /// the first invalid one are still applied.
  pub fn parse_from<I, T>(&self, args: I) -> Result<PluginContext<S>, PluginError>
  where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
  {
    let env_file_error = self.options.env_file.as_deref().and_then(|path| load_env_file(path).err());

    let matches = self.command().try_get_matches_from(args)?;
    let args = PluginArgs::<S>::from_arg_matches(&matches)?;

    let log_level = logger::setup_console_logger(&args.logging)?;
    if let Some(err) = env_file_error {
      warn!(error = %err, "Ignoring env file");
    }
    let network = Network::from_args(&args.network, log_level)?;

    let mut metadata = Metadata::from(args.metadata);
    if metadata.pipeline.url.is_empty()
      && let Some(url) = pipeline_url(&metadata)
    {
      metadata.pipeline.url = url;
    }

    Ok(PluginContext {
      settings: args.settings,
      metadata,
      network,
      environment: args.environment.into(),
      log_level,
    })
  }

  /// Parse `args` and run `execute` with the resulting context.
  pub async fn run_with<I, T, F, Fut>(&self, args: I, execute: F) -> anyhow::Result<()>
  where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    F: FnOnce(PluginContext<S>) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
  {
    let context = self.parse_from(args)?;
    execute(context).await
  }

  /// Run the plugin with the process arguments on a new Tokio runtime.
  ///
  /// Help and version requests print and exit like any clap program. Other
  /// failures are logged and reported through the exit code.
  pub fn run<F, Fut>(self, execute: F) -> ExitCode
  where
    F: FnOnce(PluginContext<S>) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
  {
    let result = tokio::runtime::Builder::new_multi_thread()
      .enable_all()
      .build()
      .map_err(|err| anyhow::Error::new(PluginError::Runtime(err)))
      .and_then(|runtime| runtime.block_on(self.run_with(std::env::args_os(), execute)));

    let Err(err) = result else {
      return ExitCode::SUCCESS;
    };

    if let Some(PluginError::Args(clap_err)) = err.downcast_ref::<PluginError>() {
      clap_err.exit();
    }

    // Failures before logging was configured still need to be visible
    logger::init_tracing(LevelFilter::INFO);
    error!(error = %format!("{err:#}"), "execution failed");
    ExitCode::FAILURE
  }
}

/// Apply `path` over the process environment. Missing files are skipped.
fn load_env_file(path: &Path) -> Result<(), PluginError> {
  if !path.is_file() {
    return Ok(());
  }

  dotenvy::from_path_override(path).map_err(|source| PluginError::EnvFile {
    path: path.to_path_buf(),
    source,
  })
}

/// `SYSTEM_URL/repos/REPO_SLUG/pipeline/NUMBER`, or `None` without a usable
/// system URL.
fn pipeline_url(metadata: &Metadata) -> Option<String> {
  let mut url = Url::parse(&metadata.system.url).ok()?;
  let number = metadata.pipeline.number.to_string();

  url
    .path_segments_mut()
    .ok()?
    .pop_if_empty()
    .push("repos")
    .extend(metadata.repository.slug.split('/').filter(|part| !part.is_empty()))
    .push("pipeline")
    .push(&number);

  debug!(url = %url, "Derived pipeline URL");
  Some(url.into())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;
  use wp_plugin_core::StringSlice;
  use wp_plugin_test_utils::EnvVarGuard;

  use super::*;

  #[derive(Debug, Clone, Args)]
  struct Settings {
    /// greeting
    #[arg(long = "message", env = "PLUGIN_MESSAGE", default_value = "hello")]
    message: String,

    /// tags to publish
    #[arg(long = "tags", env = "PLUGIN_TAGS", value_parser = wp_plugin_core::StringSliceParser::default(), default_value = "")]
    tags: StringSlice,
  }

  fn plugin() -> Plugin<Settings> {
    Plugin::new(
      Options::new("dummy", "1.0.0")
        .description("dummy plugin")
        .version_metadata("rev=abc")
        .env_file(None),
    )
  }

  fn clean_env() -> EnvVarGuard {
    let mut env = EnvVarGuard::new();
    env
      .remove_prefixed("CI_")
      .remove_prefixed("PLUGIN_")
      .remove("SOCKS_PROXY")
      .remove("SOCKS_PROXY_OFF");
    env
  }

  #[test]
  fn parses_settings_and_metadata() {
    let mut env = clean_env();
    env
      .set("PLUGIN_TAGS", "a,b\\,c")
      .set("CI_COMMIT_MESSAGE", "title\nbody")
      .set("CI_REPO", "owner/repo");

    let ctx = plugin().parse_from(["dummy", "--message", "hi"]).unwrap();

    assert_eq!(ctx.settings.message, "hi");
    assert_eq!(ctx.settings.tags.as_slice(), ["a", "b,c"]);
    assert_eq!(ctx.metadata.curr.title, "title");
    assert_eq!(ctx.metadata.repository.slug, "owner/repo");
    assert_eq!(ctx.log_level, LevelFilter::INFO);
  }

  #[test]
  fn derives_pipeline_url() {
    let mut env = clean_env();
    env
      .set("CI_SYSTEM_URL", "https://ci.example.com")
      .set("CI_REPO_OWNER", "octo")
      .set("CI_REPO_NAME", "demo")
      .set("CI_PIPELINE_NUMBER", "12");

    let ctx = plugin().parse_from(["dummy"]).unwrap();
    assert_eq!(ctx.metadata.pipeline.url, "https://ci.example.com/repos/octo/demo/pipeline/12");
  }

  #[test]
  fn derives_pipeline_url_for_nested_slug() {
    let mut env = clean_env();
    env
      .set("CI_SYSTEM_URL", "https://ci.example.com/woodpecker/")
      .set("CI_REPO", "group/sub/demo")
      .set("CI_PIPELINE_NUMBER", "7");

    let ctx = plugin().parse_from(["dummy"]).unwrap();
    assert_eq!(
      ctx.metadata.pipeline.url,
      "https://ci.example.com/woodpecker/repos/group/sub/demo/pipeline/7"
    );
  }

  #[test]
  fn keeps_explicit_pipeline_url() {
    let mut env = clean_env();
    env
      .set("CI_SYSTEM_URL", "https://ci.example.com")
      .set("CI_PIPELINE_URL", "https://ci.example.com/custom");

    let ctx = plugin().parse_from(["dummy"]).unwrap();
    assert_eq!(ctx.metadata.pipeline.url, "https://ci.example.com/custom");
  }

  #[test]
  fn pipeline_url_needs_system_url() {
    let _env = clean_env();

    let ctx = plugin().parse_from(["dummy"]).unwrap();
    assert_eq!(ctx.metadata.pipeline.url, "");
  }

  #[test]
  fn environment_flag_is_parsed() {
    let mut env = clean_env();
    env.set("PLUGIN_ENVIRONMENT", r#"{"GOOS":"linux"}"#);

    let ctx = plugin().parse_from(["dummy"]).unwrap();
    assert_eq!(ctx.environment.lookup("GOOS").as_deref(), Some("linux"));
    assert_eq!(ctx.environment.value(), vec!["GOOS=linux"]);
  }

  #[test]
  fn env_file_overrides_environment() {
    let mut env = clean_env();
    env.set("PLUGIN_MESSAGE", "from process");

    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join("env");
    fs::write(&env_file, "PLUGIN_MESSAGE=\"from file\"\n").unwrap();

    let plugin = Plugin::<Settings>::new(Options::new("dummy", "1.0.0").env_file(Some(env_file)));
    let ctx = plugin.parse_from(["dummy"]).unwrap();
    assert_eq!(ctx.settings.message, "from file");
  }

  #[test]
  fn malformed_env_file_does_not_fail() {
    let mut env = clean_env();
    env.set("PLUGIN_MESSAGE", "from process");

    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join("env");
    fs::write(&env_file, "PLUGIN_MESSAGE=from-file\nnot a valid line\n").unwrap();

    let plugin = Plugin::<Settings>::new(Options::new("dummy", "1.0.0").env_file(Some(env_file)));
    let ctx = plugin.parse_from(["dummy"]).unwrap();
    assert_eq!(ctx.settings.message, "from-file");
  }

  #[test]
  fn load_env_file_reports_malformed_line() {
    let _env = clean_env();

    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join("env");
    fs::write(&env_file, "unquoted value with spaces\n").unwrap();

    let err = load_env_file(&env_file).unwrap_err();
    assert!(matches!(err, PluginError::EnvFile { path, .. } if path == env_file));
  }

  #[test]
  fn missing_env_file_is_ignored() {
    let _env = clean_env();
    let plugin = Plugin::<Settings>::new(Options::new("dummy", "1.0.0").env_file(Some("/does/not/exist".into())));
    assert!(plugin.parse_from(["dummy"]).is_ok());
  }

  #[test]
  fn unknown_log_level_is_an_error() {
    let mut env = clean_env();
    env.set("PLUGIN_LOG_LEVEL", "loud");

    let err = plugin().parse_from(["dummy"]).unwrap_err();
    assert!(matches!(err, PluginError::UnknownLogLevel(level) if level == "loud"));
  }

  #[test]
  fn version_includes_metadata() {
    let _env = clean_env();

    let err = plugin().parse_from(["dummy", "--version"]).unwrap_err();
    let PluginError::Args(clap_err) = err else {
      panic!("expected clap error");
    };
    assert_eq!(clap_err.kind(), clap::error::ErrorKind::DisplayVersion);
    assert_eq!(clap_err.to_string().trim(), "dummy version=1.0.0 rev=abc");
  }

  #[test]
  fn help_groups_flags() {
    let help = plugin().command().render_help().to_string();

    assert!(help.contains("Woodpecker Repository Flags"));
    assert!(help.contains("Woodpecker Commit Flags"));
    assert!(help.contains("Plugin Flags"));
    assert!(help.contains("--repo.name"));
    assert!(!help.contains("--transport.socks-proxy "));
  }

  #[tokio::test]
  async fn run_with_calls_execute() {
    let mut env = clean_env();
    env.set("CI_COMMIT_SHA", "abc123");

    let mut seen = None;
    plugin()
      .run_with(["dummy"], |ctx| {
        seen = Some(ctx.metadata.curr.sha.clone());
        async { Ok::<_, anyhow::Error>(()) }
      })
      .await
      .unwrap();

    assert_eq!(seen.as_deref(), Some("abc123"));
  }

  #[tokio::test]
  async fn run_with_propagates_execute_error() {
    let _env = clean_env();

    let err = plugin()
      .run_with(["dummy"], |_| async { Err::<(), _>(anyhow::anyhow!("boom")) })
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "boom");
  }
}
