//! # Pipeline Metadata
//!
//! Typed views of the `CI_*` variables Woodpecker exposes to every step. Each
//! group is a flattened set of flags so values can also be passed on the
//! command line, which is handy when running a plugin locally.

mod commit;
mod pipeline;
mod repo;
mod step;
mod system;

use chrono::{DateTime, Utc};
use clap::Args;
pub use commit::{Author, Commit, CommitArgs, PrevCommitArgs, split_message};
pub use pipeline::{Pipeline, PipelineArgs};
pub use repo::{Repository, RepositoryArgs};
use serde::Serialize;
pub use step::{Step, StepArgs};
pub use system::System;

/// All metadata flags.
#[derive(Debug, Clone, Default, Args)]
pub struct MetadataArgs {
  #[command(flatten)]
  pub repository: RepositoryArgs,
  #[command(flatten)]
  pub pipeline: PipelineArgs,
  #[command(flatten)]
  pub curr: CommitArgs,
  #[command(flatten)]
  pub prev: PrevCommitArgs,
  #[command(flatten)]
  pub step: StepArgs,
  #[command(flatten)]
  pub system: System,
}

/// Runtime metadata of the current pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
  pub repository: Repository,
  pub pipeline: Pipeline,
  /// The commit being built
  pub curr: Commit,
  /// The commit of the previous pipeline
  pub prev: Commit,
  pub step: Step,
  pub system: System,
}

impl From<MetadataArgs> for Metadata {
  fn from(args: MetadataArgs) -> Self {
    Self {
      repository: args.repository.into(),
      pipeline: args.pipeline.into(),
      curr: args.curr.into(),
      prev: args.prev.into(),
      step: args.step.into(),
      system: args.system,
    }
  }
}

impl Default for Metadata {
  fn default() -> Self {
    MetadataArgs::default().into()
  }
}

/// Unix seconds as a UTC timestamp. Out of range values map to the epoch.
fn unix_time(secs: i64) -> DateTime<Utc> {
  DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
