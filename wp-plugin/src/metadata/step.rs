use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use wp_plugin_core::parse_int;

use super::unix_time;
use crate::headings;

#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = headings::STEP)]
pub struct StepArgs {
  /// step number
  #[arg(
    id = "step.number",
    long = "step.number",
    env = "CI_STEP_NUMBER",
    value_parser = parse_int,
    value_name = "NUMBER",
    default_value = ""
  )]
  pub number: i64,

  /// step start time
  #[arg(
    id = "step.started",
    long = "step.started",
    env = "CI_STEP_STARTED",
    value_parser = parse_int,
    value_name = "NUMBER",
    default_value = ""
  )]
  pub started: i64,

  /// step finish time
  #[arg(
    id = "step.finished",
    long = "step.finished",
    env = "CI_STEP_FINISHED",
    value_parser = parse_int,
    value_name = "NUMBER",
    default_value = ""
  )]
  pub finished: i64,
}

/// Runtime metadata for a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
  pub number: i64,
  pub started: DateTime<Utc>,
  pub finished: DateTime<Utc>,
}

impl From<StepArgs> for Step {
  fn from(args: StepArgs) -> Self {
    Self {
      number: args.number,
      started: unix_time(args.started),
      finished: unix_time(args.finished),
    }
  }
}
