//! wp-demo: a small plugin built on the toolkit.
//!
//! It resolves the image tags for the current ref, renders a summary template
//! against the pipeline metadata and optionally runs a command with the
//! plugin environment applied.

mod cli;

use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::{Context, Result};
pub use cli::Settings;
use serde::Serialize;
use tracing::{debug, info};
use wp_plugin::{Metadata, Options, Plugin, PluginContext};
use wp_plugin_core::{Cmd, is_taggable, render_trim, semver_tag_suffix};

pub const NAME: &str = "wp-demo";

#[derive(Serialize)]
struct Summary<'a> {
  #[serde(flatten)]
  metadata: &'a Metadata,
  tags: &'a [String],
  labels: &'a BTreeMap<String, String>,
}

/// The plugin definition, shared by the binary and the docs generator.
pub fn plugin() -> Plugin<Settings> {
  Plugin::new(
    Options::new(NAME, env!("CARGO_PKG_VERSION")).description("Derive image tags and render a pipeline summary"),
  )
}

/// Execute the plugin with the process arguments.
pub fn run() -> ExitCode {
  plugin().run(execute)
}

pub async fn execute(ctx: PluginContext<Settings>) -> Result<()> {
  let settings = &ctx.settings;
  let metadata = &ctx.metadata;
  debug!(repo = %metadata.repository.slug, pipeline = metadata.pipeline.number, "Starting");

  let tags = resolve_tags(settings, metadata)?;
  info!("tags: {}", tags.join(","));

  let summary = Summary {
    metadata,
    tags: &tags,
    labels: &settings.labels,
  };
  let rendered = render_trim(&ctx.network.client, &settings.template, &summary)
    .await
    .context("Failed to render summary")?;
  info!("{rendered}");

  if let Some((program, args)) = settings.command.split_first() {
    Cmd::lookup(program)?
      .args(args)
      .envs(ctx.environment.iter())
      .run()
      .with_context(|| format!("Command '{program}' failed"))?;
  }

  Ok(())
}

/// The tags to publish: derived from the commit ref when auto tagging is on
/// and the ref is taggable, otherwise the configured list.
pub fn resolve_tags(settings: &Settings, metadata: &Metadata) -> Result<Vec<String>> {
  let git_ref = &metadata.curr.git_ref;

  if !settings.auto_tag {
    return Ok(settings.tags.to_vec());
  }

  if !is_taggable(git_ref, &metadata.repository.branch) {
    info!(git_ref = %git_ref, "Ref is not taggable, skipping");
    return Ok(Vec::new());
  }

  semver_tag_suffix(git_ref, &settings.auto_tag_suffix, settings.strict_semver)
    .with_context(|| format!("Failed to derive tags from '{git_ref}'"))
}
