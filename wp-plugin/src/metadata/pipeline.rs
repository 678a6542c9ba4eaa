use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use wp_plugin_core::parse_int;

use super::unix_time;
use crate::headings;

/// Pipeline flags. Times are unix seconds.
#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = headings::PIPELINE)]
pub struct PipelineArgs {
  /// pipeline number
  #[arg(
    id = "pipeline.number",
    long = "pipeline.number",
    env = "CI_PIPELINE_NUMBER",
    value_parser = parse_int,
    value_name = "NUMBER",
    default_value = ""
  )]
  pub number: i64,

  /// pipeline status
  #[arg(id = "pipeline.status", long = "pipeline.status", env = "CI_PIPELINE_STATUS", default_value = "")]
  pub status: String,

  /// pipeline event
  #[arg(id = "pipeline.event", long = "pipeline.event", env = "CI_PIPELINE_EVENT", default_value = "")]
  pub event: String,

  /// pipeline url
  #[arg(id = "pipeline.url", long = "pipeline.url", env = "CI_PIPELINE_URL", default_value = "")]
  pub url: String,

  /// pipeline deployment target
  #[arg(
    id = "pipeline.deploy-target",
    long = "pipeline.deploy-target",
    env = "CI_PIPELINE_DEPLOY_TARGET",
    default_value = ""
  )]
  pub deploy_target: String,

  /// pipeline creation time
  #[arg(
    id = "pipeline.created",
    long = "pipeline.created",
    env = "CI_PIPELINE_CREATED",
    value_parser = parse_int,
    value_name = "NUMBER",
    default_value = ""
  )]
  pub created: i64,

  /// pipeline start time
  #[arg(
    id = "pipeline.started",
    long = "pipeline.started",
    env = "CI_PIPELINE_STARTED",
    value_parser = parse_int,
    value_name = "NUMBER",
    default_value = ""
  )]
  pub started: i64,

  /// pipeline finish time
  #[arg(
    id = "pipeline.finished",
    long = "pipeline.finished",
    env = "CI_PIPELINE_FINISHED",
    value_parser = parse_int,
    value_name = "NUMBER",
    default_value = ""
  )]
  pub finished: i64,

  /// pipeline parent
  #[arg(
    id = "pipeline.parent",
    long = "pipeline.parent",
    env = "CI_PIPELINE_PARENT",
    value_parser = parse_int,
    value_name = "NUMBER",
    default_value = ""
  )]
  pub parent: i64,
}

/// Runtime metadata for a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pipeline {
  pub number: i64,
  pub status: String,
  pub event: String,
  pub url: String,
  pub deploy_target: String,
  pub created: DateTime<Utc>,
  pub started: DateTime<Utc>,
  pub finished: DateTime<Utc>,
  pub parent: i64,
}

impl From<PipelineArgs> for Pipeline {
  fn from(args: PipelineArgs) -> Self {
    Self {
      number: args.number,
      status: args.status,
      event: args.event,
      url: args.url,
      deploy_target: args.deploy_target,
      created: unix_time(args.created),
      started: unix_time(args.started),
      finished: unix_time(args.finished),
      parent: args.parent,
    }
  }
}
